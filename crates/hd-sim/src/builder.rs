//! Fluent builder for constructing a [`Sim`].

use hd_behavior::AgentTuning;
use hd_core::{Point3, SimConfig};
use hd_mobility::{NavConfig, NavigationEngine};
use hd_schedule::TimerQueue;
use hd_sense::{ProximityVolume, SensoryStore, SightConfig};

use crate::{ScenarioConfig, Sim, SimResult, TargetSpawn};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default                          |
/// |-------------------------------|----------------------------------|
/// | `.tuning(t)`                  | `AgentTuning::default()`         |
/// | `.sight(s)`                   | 500 / 550 radius, 5 s memory     |
/// | `.proximity(v)`               | 60 × 60 × 40 box, 70 units ahead |
/// | `.navigation(n)`              | 10 acceptance, 50 follow         |
/// | `.agent(p)` / `.agent_with()` | no agents                        |
/// | `.target(p)` / `.prop(p)`     | no entities                      |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default())
///     .agent(Point3::ORIGIN)
///     .target(Point3::new(300.0, 0.0, 0.0))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    scenario: ScenarioConfig,
    /// Agents with their own tuning, spawned after the scenario's.
    custom:   Vec<(Point3, AgentTuning)>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self::from_scenario(ScenarioConfig { sim: config, ..ScenarioConfig::default() })
    }

    /// Start from a parsed scenario; its agents, targets and props are kept.
    pub fn from_scenario(scenario: ScenarioConfig) -> Self {
        Self { scenario, custom: Vec::new() }
    }

    /// Tuning shared by agents added without their own.
    pub fn tuning(mut self, tuning: AgentTuning) -> Self {
        self.scenario.agent = tuning;
        self
    }

    pub fn sight(mut self, sight: SightConfig) -> Self {
        self.scenario.sight = sight;
        self
    }

    pub fn proximity(mut self, volume: ProximityVolume) -> Self {
        self.scenario.proximity = volume;
        self
    }

    pub fn navigation(mut self, navigation: NavConfig) -> Self {
        self.scenario.navigation = navigation;
        self
    }

    pub fn agent(mut self, spawn: Point3) -> Self {
        self.scenario.agents.push(spawn);
        self
    }

    pub fn agent_with(mut self, spawn: Point3, tuning: AgentTuning) -> Self {
        self.custom.push((spawn, tuning));
        self
    }

    pub fn target(mut self, position: Point3) -> Self {
        self.scenario.targets.push(TargetSpawn { position, waypoints: Vec::new(), speed: 0.0 });
        self
    }

    /// A target walking `waypoints` in a loop.
    pub fn patrolling_target(mut self, position: Point3, waypoints: Vec<Point3>, speed: f32) -> Self {
        self.scenario.targets.push(TargetSpawn { position, waypoints, speed });
        self
    }

    pub fn prop(mut self, position: Point3) -> Self {
        self.scenario.props.push(position);
        self
    }

    /// Validate every input, register all entities, then activate each agent
    /// in ascending id order.
    ///
    /// Agents get the lowest entity ids, followed by targets, then props.
    pub fn build(self) -> SimResult<Sim> {
        self.scenario.validate()?;
        let ScenarioConfig { sim, agent, sight, proximity, navigation, agents, targets, props } =
            self.scenario;

        // ── Services ──────────────────────────────────────────────────────
        let timers = TimerQueue::new(sim.tick_duration_ms)?;
        let senses = SensoryStore::new(sight, proximity, sim.tick_duration_ms)?;
        let nav = NavigationEngine::new(navigation);
        let mut out = Sim::new(sim, agent.clone(), timers, nav, senses);

        // ── Entities ──────────────────────────────────────────────────────
        let mut spawned = Vec::with_capacity(agents.len() + self.custom.len());
        for spawn in agents {
            spawned.push(out.insert_agent(spawn, agent.clone())?);
        }
        for (spawn, tuning) in self.custom {
            spawned.push(out.insert_agent(spawn, tuning)?);
        }
        for t in targets {
            out.spawn_patrolling_target(t.position, t.waypoints, t.speed);
        }
        for p in props {
            out.spawn_prop(p);
        }

        // ── Activate ──────────────────────────────────────────────────────
        for id in spawned {
            out.activate(id);
        }
        tracing::info!("built simulation with {} agents, {} entities", out.live_agent_count(), out.world.len());
        Ok(out)
    }
}
