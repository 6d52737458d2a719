//! Scenario files.
//!
//! A scenario is a TOML document; every table is optional and falls back to
//! defaults:
//!
//! ```toml
//! [sim]
//! tick_duration_ms = 100
//! total_ticks      = 600
//! seed             = 42
//!
//! [agent]            # AgentTuning shared by every agent
//! roam_radius = 400.0
//!
//! [sight]
//! sight_radius      = 500.0
//! lose_sight_radius = 550.0
//!
//! [proximity]
//! [navigation]
//!
//! [[agents]]         # spawn points
//! x = 0.0
//! y = 0.0
//! z = 0.0
//!
//! [[targets]]
//! position  = { x = 800.0, y = 0.0, z = 0.0 }
//! waypoints = [{ x = 0.0, y = 0.0, z = 0.0 }]
//! speed     = 120.0
//!
//! [[props]]
//! x = 50.0
//! y = 50.0
//! z = 0.0
//! ```

use std::path::Path;

use hd_behavior::AgentTuning;
use hd_core::{Point3, SimConfig};
use hd_mobility::NavConfig;
use hd_sense::{ProximityVolume, SightConfig};
use serde::{Deserialize, Serialize};

use crate::SimResult;

/// A target entity to place at start-up, optionally walking a looped route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSpawn {
    pub position:  Point3,
    #[serde(default)]
    pub waypoints: Vec<Point3>,
    #[serde(default)]
    pub speed:     f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sim:        SimConfig,
    pub agent:      AgentTuning,
    pub sight:      SightConfig,
    pub proximity:  ProximityVolume,
    pub navigation: NavConfig,

    pub agents:  Vec<Point3>,
    pub targets: Vec<TargetSpawn>,
    pub props:   Vec<Point3>,
}

impl ScenarioConfig {
    pub fn from_toml_str(s: &str) -> SimResult<Self> {
        let scenario: ScenarioConfig = toml::from_str(s)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check every table.  Errors name the offending table.
    pub fn validate(&self) -> SimResult<()> {
        self.sim.validate()?;
        self.agent.validate()?;
        self.sight.validate()?;
        self.proximity.validate()?;
        if !(self.navigation.acceptance_radius >= 0.0) || !(self.navigation.follow_distance >= 0.0) {
            return Err(crate::SimError::Config(
                "navigation radii must be non-negative".to_string(),
            ));
        }
        for (i, t) in self.targets.iter().enumerate() {
            if !t.waypoints.is_empty() && !(t.speed > 0.0) {
                return Err(crate::SimError::Config(format!(
                    "target {i} has waypoints but no positive speed"
                )));
            }
        }
        Ok(())
    }
}
