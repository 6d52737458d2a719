//! siege: a horde camp harassed by a single patrolling raider.
//!
//! Six agents roam around their camp.  A raider walks a loop through it; any
//! agent that sees the raider gives chase, and agents close enough to strike
//! are struck back every two seconds until they fall.  Dead agents play their
//! dying animation and are removed.
//!
//! ```text
//! cargo run -p siege                      # embedded scenario
//! cargo run -p siege -- my_scenario.toml  # scenario file
//! RUST_LOG=hd_behavior=debug cargo run -p siege
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use hd_behavior::{BehaviorState, DamageOutcome};
use hd_core::{AgentId, Tick};
use hd_output::{CsvWriter, OutputWriter, SimOutputObserver};
use hd_sim::{ScenarioConfig, SimBuilder, SimObserver, TickSummary, TransitionRecord};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:        &str = "output/siege";
/// The raider strikes back every this many ticks.
const STRIKE_EVERY:      u64  = 20;
const STRIKE_DAMAGE:     f32  = 35.0;

// ── Scenario ──────────────────────────────────────────────────────────────────

const SCENARIO_TOML: &str = r#"
[sim]
tick_duration_ms = 100
total_ticks      = 1200
seed             = 7

[agent]
roam_radius     = 300.0
roam_delay_secs = 2.0

[sight]
sight_radius      = 450.0
lose_sight_radius = 520.0

[[agents]]
x = 0.0
y = 0.0
z = 0.0

[[agents]]
x = 200.0
y = 0.0
z = 0.0

[[agents]]
x = 0.0
y = 200.0
z = 0.0

[[agents]]
x = -200.0
y = 0.0
z = 0.0

[[agents]]
x = 0.0
y = -200.0
z = 0.0

[[agents]]
x = 1500.0
y = 1500.0
z = 0.0

[[targets]]
position  = { x = -1200.0, y = 0.0, z = 0.0 }
waypoints = [
    { x = 1200.0,  y = 0.0,    z = 0.0 },
    { x = 1200.0,  y = 1200.0, z = 0.0 },
    { x = -1200.0, y = 1200.0, z = 0.0 },
    { x = -1200.0, y = 0.0,    z = 0.0 },
]
speed = 150.0

[[props]]
x = 100.0
y = 100.0
z = 0.0
"#;

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:       SimOutputObserver<W>,
    transitions: usize,
    deaths:      usize,
    removals:    usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, transitions: 0, deaths: 0, removals: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_transition(&mut self, record: &TransitionRecord) {
        self.transitions += 1;
        if record.to == BehaviorState::Dead {
            self.deaths += 1;
        }
        self.inner.on_transition(record);
    }

    fn on_agent_removed(&mut self, tick: Tick, agent: AgentId) {
        self.removals += 1;
        self.inner.on_agent_removed(tick, agent);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.inner.on_tick_end(tick, summary);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Scenario.
    let scenario = match std::env::args().nth(1) {
        Some(path) => ScenarioConfig::load(&path)?,
        None => ScenarioConfig::from_toml_str(SCENARIO_TOML)?,
    };
    println!("=== siege: rust_horde ===");
    println!(
        "Agents: {}  |  Targets: {}  |  Ticks: {} × {} ms  |  Seed: {}",
        scenario.agents.len(),
        scenario.targets.len(),
        scenario.sim.total_ticks,
        scenario.sim.tick_duration_ms,
        scenario.sim.seed,
    );
    println!();

    // 2. Build sim.
    let mut sim = SimBuilder::from_scenario(scenario).build()?;
    let end = sim.config.end_tick();

    // 3. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 4. Run, striking attackers between ticks.
    let t0 = Instant::now();
    while sim.clock.current_tick < end {
        let tick = sim.clock.current_tick;
        if tick.0 > 0 && tick.0 % STRIKE_EVERY == 0 {
            let attackers: Vec<AgentId> = (0..sim.agents.len() as u32)
                .map(AgentId)
                .filter(|&a| sim.state(a) == Some(BehaviorState::Attack))
                .collect();
            for agent in attackers {
                if sim.apply_damage(agent, STRIKE_DAMAGE)? == DamageOutcome::Killed {
                    tracing::info!("{}: struck down at {}", agent, tick);
                }
            }
        }
        sim.step(&mut obs)?;
    }
    obs.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  transitions.csv    : {} rows", obs.transitions);
    println!("  tick_summaries.csv : {} rows", end.0);
    println!("  deaths / removals  : {} / {}", obs.deaths, obs.removals);
    println!();

    // 6. Final agent table.
    println!("{:<8} {:<8} {:>8} {:<24}", "Agent", "State", "Health", "Position");
    println!("{}", "-".repeat(50));
    for i in 0..sim.agents.len() {
        let id = AgentId(i as u32);
        match sim.agent(id) {
            Some(agent) => println!(
                "{:<8} {:<8} {:>8.1} {:<24}",
                i,
                agent.state().state().as_str(),
                agent.state().health(),
                sim.position(id).map(|p| p.to_string()).unwrap_or_default(),
            ),
            None => println!("{:<8} {:<8}", i, "removed"),
        }
    }

    Ok(())
}
