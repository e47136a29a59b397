//! Fixed pool of stars flying toward the camera, each leaving a short trail.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::StarfieldConfig,
    math::Point3D,
    render::{Canvas, Point, Rgba},
    Result,
};

pub const TRAIL_CAPACITY: usize = 5;

/// Perspective scale numerator for stars; independent of the cube zoom.
const STAR_PERSPECTIVE: f64 = 3.0;

/// Fixed-capacity FIFO of recent screen positions, oldest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trail {
    points: [Point3D; TRAIL_CAPACITY],
    head: usize,
    len: usize,
}

impl Trail {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Appends `point`, evicting the oldest entry when full.
    pub fn push(&mut self, point: Point3D) {
        if self.len == TRAIL_CAPACITY {
            self.points[self.head] = point;
            self.head = (self.head + 1) % TRAIL_CAPACITY;
        } else {
            self.points[(self.head + self.len) % TRAIL_CAPACITY] = point;
            self.len += 1;
        }
    }

    /// Entry `index` counted from the oldest.
    pub fn get(&self, index: usize) -> Option<Point3D> {
        (index < self.len).then(|| self.points[(self.head + index) % TRAIL_CAPACITY])
    }
}

#[derive(Debug, Clone)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Distance from the camera in `(0, 1]`.
    pub z: f64,
    pub speed: f64,
    pub trail: Trail,
}

impl Star {
    fn spawn<R: Rng>(rng: &mut R, speeds: (f64, f64), z: f64) -> Self {
        Self {
            x: rng.gen_range(-1.0..=1.0),
            y: rng.gen_range(-1.0..=1.0),
            z,
            speed: rng.gen_range(speeds.0..=speeds.1),
            trail: Trail::default(),
        }
    }

    /// Moves the star one step closer, respawning it at the back in place
    /// once it passes the camera. Returns whether it respawned.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, speeds: (f64, f64)) -> bool {
        self.z -= self.speed;
        if self.z > 0.0 {
            return false;
        }
        *self = Star::spawn(rng, speeds, 1.0);
        true
    }

    /// Screen offset from the view centre.
    pub fn project(&self, width: u32, height: u32) -> Point3D {
        let factor = STAR_PERSPECTIVE / self.z;
        Point3D {
            x: self.x * factor * f64::from(width) / 2.0,
            y: self.y * factor * f64::from(height) / 2.0,
            z: self.z,
        }
    }
}

#[derive(Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    speeds: (f64, f64),
    rng: StdRng,
}

impl Starfield {
    pub fn new(config: &StarfieldConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let speeds = (config.min_speed, config.max_speed);
        let stars = (0..config.count)
            .map(|_| {
                // `1 - [0, 1)` gives a depth in `(0, 1]`.
                let z = 1.0 - rng.gen::<f64>();
                Star::spawn(&mut rng, speeds, z)
            })
            .collect();
        Self { stars, speeds, rng }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Advances every star and records its new screen position in its trail.
    pub fn update(&mut self, width: u32, height: u32) {
        for star in &mut self.stars {
            star.advance(&mut self.rng, self.speeds);
            let projected = star.project(width, height);
            star.trail.push(projected);
        }
    }

    /// Draws each trail fading in toward the star, then the star itself.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<()> {
        let (width, height) = canvas.size();
        let (cx, cy) = ((width / 2) as i32, (height / 2) as i32);
        let to_screen = |p: Point3D| Point::new((p.x as i32).saturating_add(cx), (p.y as i32).saturating_add(cy));

        for star in &self.stars {
            let len = star.trail.len();
            for j in (1..len).rev() {
                let (Some(from), Some(to)) = (star.trail.get(j - 1), star.trail.get(j)) else {
                    continue;
                };
                let level = (255.0 * j as f64 / len as f64) as u8;
                canvas.set_draw_color(Rgba::grey(level));
                canvas.draw_line(to_screen(from), to_screen(to))?;
            }

            canvas.set_draw_color(Rgba::WHITE);
            canvas.draw_point(to_screen(star.project(width, height)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(count: usize) -> Starfield {
        Starfield::new(&StarfieldConfig {
            count,
            seed: Some(7),
            ..StarfieldConfig::default()
        })
    }

    #[test]
    fn initial_pool_respects_ranges() {
        let field = seeded(500);
        assert_eq!(field.stars().len(), 500);
        for star in field.stars() {
            assert!((-1.0..=1.0).contains(&star.x));
            assert!((-1.0..=1.0).contains(&star.y));
            assert!(star.z > 0.0 && star.z <= 1.0);
            assert!((0.01..=0.06).contains(&star.speed));
            assert!(star.trail.is_empty());
        }
    }

    #[test]
    fn passing_the_camera_respawns_in_place() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut star = Star {
            x: 0.5,
            y: 0.5,
            z: 0.03,
            speed: 0.05,
            trail: Trail::default(),
        };
        star.trail.push(Point3D::default());
        star.trail.push(Point3D::default());

        assert!(star.advance(&mut rng, (0.01, 0.06)));
        assert_eq!(star.z, 1.0);
        assert!(star.trail.is_empty());
        assert!((0.01..=0.06).contains(&star.speed));
    }

    #[test]
    fn pool_size_and_depth_invariants_hold_over_time() {
        let mut field = seeded(200);
        for _ in 0..300 {
            field.update(640, 480);
            assert_eq!(field.stars().len(), 200);
            for star in field.stars() {
                assert!(star.z > 0.0 && star.z <= 1.0);
                assert!(star.trail.len() >= 1 && star.trail.len() <= TRAIL_CAPACITY);
            }
        }
    }

    #[test]
    fn trail_evicts_oldest_first() {
        let mut trail = Trail::default();
        for i in 0..7 {
            trail.push(Point3D::new(f64::from(i), 0.0, 0.0));
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        let xs: Vec<f64> = (0..trail.len()).map(|i| trail.get(i).unwrap().x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(trail.get(5).is_none());
    }

    #[test]
    fn same_seed_gives_same_field() {
        let a = seeded(10);
        let b = seeded(10);
        for (sa, sb) in a.stars().iter().zip(b.stars()) {
            assert_eq!((sa.x, sa.y, sa.z, sa.speed), (sb.x, sb.y, sb.z, sb.speed));
        }
    }
}
