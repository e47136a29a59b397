//! The spinning cube: fixed geometry, zoom easing and the per-frame draw.

use crate::{
    config::{CubeConfig, ZoomConfig},
    math::{rotate, Point3D, Projection},
    raster::fill_polygon,
    render::{Canvas, Point, Rgba},
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

const fn edge(start: usize, end: usize) -> Edge {
    Edge { start, end }
}

pub const CUBE_VERTICES: [Point3D; 8] = [
    Point3D::new(1.0, 1.0, -1.0),
    Point3D::new(1.0, -1.0, -1.0),
    Point3D::new(-1.0, -1.0, -1.0),
    Point3D::new(-1.0, 1.0, -1.0),
    Point3D::new(1.0, 1.0, 1.0),
    Point3D::new(1.0, -1.0, 1.0),
    Point3D::new(-1.0, -1.0, 1.0),
    Point3D::new(-1.0, 1.0, 1.0),
];

pub const CUBE_EDGES: [Edge; 12] = [
    edge(0, 1),
    edge(1, 2),
    edge(2, 3),
    edge(3, 0),
    edge(4, 5),
    edge(5, 6),
    edge(6, 7),
    edge(7, 4),
    edge(0, 4),
    edge(1, 5),
    edge(2, 6),
    edge(3, 7),
];

/// Back, front, top, bottom, left, right.
pub const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [3, 2, 6, 7],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
];

/// Flat colour per face. Back and front are fully transparent so the
/// wireframe shows through the coloured sides.
pub const FACE_COLORS: [Rgba; 6] = [
    Rgba::TRANSPARENT,
    Rgba::TRANSPARENT,
    Rgba::opaque(255, 0, 0),
    Rgba::opaque(0, 255, 0),
    Rgba::opaque(0, 0, 255),
    Rgba::opaque(255, 255, 0),
];

/// Zoom factor easing toward a key-controlled target.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    current: f64,
    target: f64,
    step: f64,
    min: f64,
    max: f64,
    key_step: f64,
    bounce_back: Option<f64>,
}

impl ZoomState {
    pub fn new(config: &ZoomConfig) -> Self {
        Self {
            current: config.start,
            target: config.target.clamp(config.min, config.max),
            step: config.step,
            min: config.min,
            max: config.max,
            key_step: config.key_step,
            bounce_back: None,
        }
    }

    /// Swaps the target for `target` the first time the current one is
    /// reached.
    pub fn with_bounce_back(mut self, target: Option<f64>) -> Self {
        self.bounce_back = target.map(|t| t.clamp(self.min, self.max));
        self
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Moves `current` one step toward the target, landing exactly on it.
    pub fn update(&mut self) {
        if self.current < self.target {
            self.current = (self.current + self.step).min(self.target);
        } else if self.current > self.target {
            self.current = (self.current - self.step).max(self.target);
        }

        if self.current == self.target {
            if let Some(next) = self.bounce_back.take() {
                tracing::debug!(from = self.target, to = next, "zoom bouncing back");
                self.target = next;
            }
        }
    }

    pub fn zoom_in(&mut self) {
        self.target = (self.target + self.key_step).min(self.max);
        tracing::debug!(zoom_target = self.target, "zoom target raised");
    }

    pub fn zoom_out(&mut self) {
        self.target = (self.target - self.key_step).max(self.min);
        tracing::debug!(zoom_target = self.target, "zoom target lowered");
    }
}

/// Rotation angle, zoom and the camera distance used to draw the cube.
#[derive(Debug, Clone)]
pub struct Cube {
    angle: f64,
    rotation_step: f64,
    camera_distance: f64,
    zoom: ZoomState,
}

impl Cube {
    pub fn new(config: &CubeConfig) -> Self {
        Self {
            angle: 0.0,
            rotation_step: config.rotation_step,
            camera_distance: config.camera_distance,
            zoom: ZoomState::new(&config.zoom).with_bounce_back(config.bounce_back_target),
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomState {
        &mut self.zoom
    }

    pub fn advance_rotation(&mut self) {
        self.angle += self.rotation_step;
    }

    /// Screen positions of the eight vertices for the current angle and zoom.
    pub fn project_vertices(&self, width: u32, height: u32) -> [Point; 8] {
        let camera = Projection::new(self.camera_distance, self.zoom.current(), width, height);
        let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        CUBE_VERTICES.map(|vertex| {
            let p = camera.project(rotate(vertex, self.angle));
            Point::new((p.x + cx) as i32, (p.y + cy) as i32)
        })
    }

    /// Fills the visible faces, then draws every edge in white on top.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<()> {
        let (width, height) = canvas.size();
        let points = self.project_vertices(width, height);

        for (face, color) in CUBE_FACES.iter().zip(FACE_COLORS) {
            if color.a == 0 {
                continue;
            }
            canvas.set_draw_color(color);
            fill_polygon(canvas, &points, face)?;
        }

        canvas.set_draw_color(Rgba::WHITE);
        for edge in CUBE_EDGES {
            canvas.draw_line(points[edge.start], points[edge.end])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Framebuffer;

    #[test]
    fn geometry_is_consistent() {
        for face in CUBE_FACES {
            assert!(face.iter().all(|&i| i < CUBE_VERTICES.len()));
        }
        for e in CUBE_EDGES {
            assert_ne!(e.start, e.end);
        }
        assert_eq!(FACE_COLORS.iter().filter(|c| c.a == 0).count(), 2);
    }

    #[test]
    fn projections_stay_finite_for_any_angle_and_zoom() {
        let camera_distance = CubeConfig::default().camera_distance;
        for zoom_step in 0..=10 {
            let zoom = 0.1 + 0.05 * f64::from(zoom_step);
            let camera = Projection::new(camera_distance, zoom, 1920, 1080);
            for k in 0..720 {
                let angle = f64::from(k) * 0.05 - 5.0;
                for v in CUBE_VERTICES {
                    assert!(camera.project(rotate(v, angle)).is_finite());
                }
            }
        }
    }

    #[test]
    fn zoom_reaches_target_exactly_after_250_frames() {
        let mut zoom = ZoomState::new(&ZoomConfig::default());
        for _ in 0..249 {
            zoom.update();
        }
        assert!(zoom.current() < 0.6);
        zoom.update();
        assert_eq!(zoom.current(), 0.6);
        zoom.update();
        assert_eq!(zoom.current(), 0.6);
    }

    #[test]
    fn zoom_never_overshoots_by_more_than_a_step() {
        let mut zoom = ZoomState::new(&ZoomConfig::default());
        for frame in 0..400 {
            if frame == 100 {
                zoom.zoom_out();
                zoom.zoom_out();
            }
            let before = zoom.current();
            zoom.update();
            assert!((zoom.current() - before).abs() <= 0.002 + 1e-12);
            assert!(zoom.current() >= 0.1 && zoom.current() <= 0.6);
        }
        assert_eq!(zoom.current(), zoom.target());
    }

    #[test]
    fn zoom_keys_are_clamped() {
        let mut zoom = ZoomState::new(&ZoomConfig::default());
        for _ in 0..10 {
            zoom.update();
        }
        zoom.zoom_in();
        assert_eq!(zoom.target(), 0.6);
        for _ in 0..20 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.target(), 0.1);
        zoom.zoom_in();
        assert!((zoom.target() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn bounce_back_switches_target_once() {
        let config = ZoomConfig::default();
        let mut zoom = ZoomState::new(&config).with_bounce_back(Some(0.2));
        for _ in 0..250 {
            zoom.update();
        }
        assert_eq!(zoom.target(), 0.2);
        for _ in 0..300 {
            zoom.update();
        }
        assert_eq!(zoom.current(), 0.2);
        assert_eq!(zoom.target(), 0.2);
    }

    #[test]
    fn draws_edges_even_with_transparent_faces() {
        let mut fb = Framebuffer::new(200, 200);
        fb.clear().unwrap();
        let mut cube = Cube::new(&CubeConfig::default());
        for _ in 0..250 {
            cube.zoom_mut().update();
        }
        cube.draw(&mut fb).unwrap();

        let points = cube.project_vertices(200, 200);
        for p in points {
            assert_eq!(fb.pixel(p.x, p.y), Some(Rgba::WHITE));
        }
    }

    #[test]
    fn rotation_advances_monotonically() {
        let mut cube = Cube::new(&CubeConfig::default());
        let mut last = cube.angle();
        for _ in 0..10 {
            cube.advance_rotation();
            assert!(cube.angle() > last);
            last = cube.angle();
        }
    }
}
