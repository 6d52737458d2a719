//! Sense tunables, usually the `[sight]` and `[proximity]` tables of a
//! scenario file.

use hd_core::Point3;
use serde::{Deserialize, Serialize};

use crate::{SenseError, SenseResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightConfig {
    /// Entities closer than this become sensed.
    pub sight_radius: f32,

    /// Sensed entities stay sensed until farther than this.  Configured on
    /// its own rather than derived from `sight_radius`, so raising the sight
    /// radius never leaves it below the sight radius unnoticed.
    pub lose_sight_radius: f32,

    /// How long a lost entity is remembered.  `<= 0` remembers forever.
    pub max_age_secs: f32,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            sight_radius:      500.0,
            lose_sight_radius: 550.0,
            max_age_secs:      5.0,
        }
    }
}

impl SightConfig {
    pub fn validate(&self) -> SenseResult<()> {
        if !self.sight_radius.is_finite() || self.sight_radius <= 0.0 {
            return Err(SenseError::SightRadius(self.sight_radius));
        }
        if !(self.lose_sight_radius >= self.sight_radius) || !self.lose_sight_radius.is_finite() {
            return Err(SenseError::LoseRadius { sight: self.sight_radius, lose: self.lose_sight_radius });
        }
        Ok(())
    }
}

/// The box in front of an agent that gates ATTACK.
///
/// `offset` is in the agent's local frame (+x forward, +z up) and turns with
/// the agent's heading; the box itself is oriented the same way.  Other
/// entities are upright bodies standing at their position, so an entity
/// overlaps when its body does, not only its centre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityVolume {
    pub offset:           Point3,
    pub half_extents:     Point3,
    /// Horizontal radius of an entity's body.
    pub body_radius:      f32,
    /// Half height of an entity's body, centred on its position.
    pub body_half_height: f32,
}

impl Default for ProximityVolume {
    fn default() -> Self {
        Self {
            offset:           Point3::new(70.0, 0.0, 40.0),
            half_extents:     Point3::new(30.0, 30.0, 20.0),
            body_radius:      34.0,
            body_half_height: 88.0,
        }
    }
}

impl ProximityVolume {
    pub fn validate(&self) -> SenseResult<()> {
        let h = self.half_extents;
        if [h.x, h.y, h.z].iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SenseError::HalfExtents(h.to_string()));
        }
        let (r, hh) = (self.body_radius, self.body_half_height);
        if !r.is_finite() || r < 0.0 || !hh.is_finite() || hh < 0.0 {
            return Err(SenseError::Body { radius: r, half_height: hh });
        }
        Ok(())
    }

    /// Radius around the agent's origin that encloses every position whose
    /// body can touch the box.
    pub fn reach(&self) -> f32 {
        Point3::ORIGIN.distance(self.offset)
            + Point3::ORIGIN.distance(self.half_extents)
            + self.body_radius
            + self.body_half_height
    }

    /// Whether a body standing at `point` overlaps the volume of an agent at
    /// `origin` facing `heading` (touching counts).
    pub fn contains(&self, origin: Point3, heading: f32, point: Point3) -> bool {
        let center = origin.offset(self.offset.rotate_z(heading));
        let rel = Point3::new(point.x - center.x, point.y - center.y, point.z - center.z);
        let local = rel.rotate_z(-heading);
        let h = self.half_extents;

        // closest point of the box footprint to the body's axis
        let dx = (local.x.abs() - h.x).max(0.0);
        let dy = (local.y.abs() - h.y).max(0.0);
        dx * dx + dy * dy <= self.body_radius * self.body_radius
            && local.z.abs() <= h.z + self.body_half_height
    }
}
