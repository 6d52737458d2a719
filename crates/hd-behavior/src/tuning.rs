//! Immutable per-agent tunables.

use serde::{Deserialize, Serialize};

use crate::{BehaviorError, BehaviorResult};

/// Per-agent configuration, fixed at spawn.
///
/// Usually the `[agent]` table of a scenario file; every field has a default
/// so partial tables are fine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentTuning {
    /// Starting health.
    pub health: f32,

    /// Whether the agent wanders around its home point when not chasing.
    pub can_roam: bool,

    /// Movement speed while roaming, units per second.
    pub roam_speed: f32,

    /// Side length of the roam box anchored at the home point.
    pub roam_radius: f32,

    /// Pause between roam legs.  `0` re-roams immediately.
    pub roam_delay_secs: f32,

    /// Movement speed while chasing, units per second.
    pub chase_speed: f32,

    /// Idle pause after losing a target before resuming idle/roam.
    pub after_chase_delay_secs: f32,

    /// Length of the dying animation; the agent is never removed before it ends.
    pub dying_animation_secs: f32,

    /// Extra delay after the dying animation before removal.  `0` removes
    /// immediately, a negative value keeps the corpse forever.
    pub post_death_destroy_secs: f32,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            health:                  100.0,
            can_roam:                true,
            roam_speed:              50.0,
            roam_radius:             400.0,
            roam_delay_secs:         3.0,
            chase_speed:             300.0,
            after_chase_delay_secs:  3.0,
            dying_animation_secs:    3.0,
            post_death_destroy_secs: 5.0,
        }
    }
}

impl AgentTuning {
    /// Reject values the state machine cannot honour.
    pub fn validate(&self) -> BehaviorResult<()> {
        let non_negative = [
            ("roam_speed", self.roam_speed),
            ("roam_radius", self.roam_radius),
            ("roam_delay_secs", self.roam_delay_secs),
            ("chase_speed", self.chase_speed),
            ("after_chase_delay_secs", self.after_chase_delay_secs),
            ("dying_animation_secs", self.dying_animation_secs),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(BehaviorError::Tuning { field, reason: "must be finite and non-negative" });
            }
        }
        if !self.health.is_finite() || self.health <= 0.0 {
            return Err(BehaviorError::Tuning { field: "health", reason: "must be finite and positive" });
        }
        if !self.post_death_destroy_secs.is_finite() {
            return Err(BehaviorError::Tuning { field: "post_death_destroy_secs", reason: "must be finite" });
        }
        Ok(())
    }
}
