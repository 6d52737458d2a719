//! World-space point type and the few spatial helpers behaviors need.
//!
//! Agents roam on a ground plane: `x`/`y` are horizontal, `z` is vertical.
//! Distances used for movement and sensing are full 3-D Euclidean; roam
//! sampling keeps `z` fixed at the home point's height.

use serde::{Deserialize, Serialize};

/// A position in world space, single precision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point3) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Squared Euclidean distance, for radius comparisons.
    #[inline]
    pub fn distance_sq(self, other: Point3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Component-wise sum.
    #[inline]
    pub fn offset(self, by: Point3) -> Point3 {
        Point3::new(self.x + by.x, self.y + by.y, self.z + by.z)
    }

    /// Step from `self` toward `goal` by at most `max_step` units.
    ///
    /// Returns `goal` exactly when it is within reach, so repeated stepping
    /// terminates without floating-point overshoot.
    pub fn step_toward(self, goal: Point3, max_step: f32) -> Point3 {
        let dist = self.distance(goal);
        if dist <= max_step || dist <= f32::EPSILON {
            return goal;
        }
        let t = max_step / dist;
        Point3::new(
            self.x + (goal.x - self.x) * t,
            self.y + (goal.y - self.y) * t,
            self.z + (goal.z - self.z) * t,
        )
    }

    /// Yaw (radians, counter-clockwise from +x) of the horizontal direction
    /// from `self` to `other`, or `None` when they share the same x/y.
    #[inline]
    pub fn heading_to(self, other: Point3) -> Option<f32> {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx.abs() <= f32::EPSILON && dy.abs() <= f32::EPSILON {
            return None;
        }
        Some(dy.atan2(dx))
    }

    /// Rotate about the vertical axis by `yaw` radians.
    #[inline]
    pub fn rotate_z(self, yaw: f32) -> Point3 {
        let (sin, cos) = yaw.sin_cos();
        Point3::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos, self.z)
    }

    /// As a fixed-size array, the point type used by the `rstar` index.
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}
