//! Rotation and perspective projection for the cube.

use serde::{Deserialize, Serialize};

/// Position in object, camera or (after projection) screen space.
///
/// Projected points keep `z` so depth-based effects can still use it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Rotates `point` in the XZ, YZ and then XY planes by the same angle.
///
/// Each stage reads the coordinates written by the previous one, so this is
/// not a fixed-axis Euler rotation. The cube's tumbling motion depends on
/// exactly this chaining.
pub fn rotate(point: Point3D, angle: f64) -> Point3D {
    let (sin, cos) = angle.sin_cos();
    let mut p = point;

    let x = p.x * cos - p.z * sin;
    let z = p.x * sin + p.z * cos;
    p.x = x;
    p.z = z;

    let y = p.y * cos - p.z * sin;
    let z = p.y * sin + p.z * cos;
    p.y = y;
    p.z = z;

    let x = p.x * cos - p.y * sin;
    let y = p.x * sin + p.y * cos;
    p.x = x;
    p.y = y;

    p
}

/// Perspective camera looking down +Z from `distance` units away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub distance: f64,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Projection {
    pub fn new(distance: f64, zoom: f64, width: u32, height: u32) -> Self {
        Self {
            distance,
            zoom,
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Maps `point` to screen offsets from the centre of the view.
    ///
    /// Callers keep `z` away from `-distance`.
    pub fn project(&self, point: Point3D) -> Point3D {
        let scale = self.distance / (self.distance + point.z) * self.zoom;
        Point3D {
            x: point.x * scale * self.width / 2.0,
            y: point.y * scale * self.height / 2.0,
            z: point.z,
        }
    }
}
