//! Agent State: the data the controller mutates.

use std::fmt;

use hd_core::Point3;
use serde::{Deserialize, Serialize};

use crate::AgentTuning;

/// The five behavior states.  Exactly one holds at any instant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorState {
    #[default]
    Idle,
    Roam,
    Chase,
    Attack,
    /// Terminal.
    Dead,
}

impl BehaviorState {
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorState::Idle   => "idle",
            BehaviorState::Roam   => "roam",
            BehaviorState::Chase  => "chase",
            BehaviorState::Attack => "attack",
            BehaviorState::Dead   => "dead",
        }
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single damage application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Non-positive or non-finite amount; nothing changed.
    Ignored,
    /// Health dropped but stayed above zero.
    Wounded,
    /// This hit crossed the death threshold.
    Killed,
    /// The agent was already dead; health is left untouched.
    AlreadyDead,
}

/// Current/previous behavior state, health, home point and tunables.
///
/// Everything is readable by animation/UI consumers; only this crate mutates.
#[derive(Clone, Debug)]
pub struct AgentState {
    state:          BehaviorState,
    previous_state: BehaviorState,
    health:         f32,
    home_point:     Point3,
    max_speed:      f32,
    tuning:         AgentTuning,
}

impl AgentState {
    /// Fresh state for an agent spawned at `spawn_point`: IDLE, full health,
    /// home point = spawn point.
    pub fn spawn(spawn_point: Point3, tuning: AgentTuning) -> Self {
        Self {
            state:          BehaviorState::Idle,
            previous_state: BehaviorState::Idle,
            health:         tuning.health,
            home_point:     spawn_point,
            max_speed:      tuning.roam_speed,
            tuning,
        }
    }

    #[inline]
    pub fn state(&self) -> BehaviorState {
        self.state
    }

    #[inline]
    pub fn previous_state(&self) -> BehaviorState {
        self.previous_state
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn home_point(&self) -> Point3 {
        self.home_point
    }

    /// Speed cap applied to movement requests; follows the roam/chase state.
    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    pub fn tuning(&self) -> &AgentTuning {
        &self.tuning
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == BehaviorState::Dead
    }

    /// Record the current state as previous and enter `to`.
    ///
    /// Returns `false` (and changes nothing) once DEAD.
    pub(crate) fn transition(&mut self, to: BehaviorState) -> bool {
        if self.is_dead() {
            return false;
        }
        self.previous_state = self.state;
        self.state = to;
        match to {
            BehaviorState::Roam  => self.max_speed = self.tuning.roam_speed,
            BehaviorState::Chase => self.max_speed = self.tuning.chase_speed,
            _ => {}
        }
        true
    }

    pub(crate) fn set_home_point(&mut self, point: Point3) {
        self.home_point = point;
    }

    /// Subtract `amount` from health.  Does not transition; the caller
    /// enters DEAD on [`DamageOutcome::Killed`].
    pub(crate) fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::AlreadyDead;
        }
        if !(amount > 0.0) || !amount.is_finite() {
            return DamageOutcome::Ignored;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }
}
