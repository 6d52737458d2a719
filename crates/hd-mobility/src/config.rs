//! Navigation tunables, usually the `[navigation]` table of a scenario file.

use hd_core::Point3;
use serde::{Deserialize, Serialize};

/// Walkable area on the ground plane.  Point goals outside it fail.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavBounds {
    pub min: Point3,
    pub max: Point3,
}

impl NavBounds {
    /// Horizontal containment; `z` is ignored.
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// A point goal counts as reached within this distance.
    pub acceptance_radius: f32,

    /// Entity goals are followed up to this distance and no closer.
    pub follow_distance: f32,

    pub bounds: Option<NavBounds>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            acceptance_radius: 10.0,
            follow_distance:   50.0,
            bounds:            None,
        }
    }
}
