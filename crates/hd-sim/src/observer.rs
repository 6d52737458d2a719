//! Simulation observer trait for progress reporting and data collection.

use hd_behavior::BehaviorState;
use hd_core::{AgentId, Tick};

/// One behavior state change, as seen from outside the agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionRecord {
    pub tick:   Tick,
    pub agent:  AgentId,
    pub from:   BehaviorState,
    pub to:     BehaviorState,
    pub health: f32,
}

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickSummary {
    /// Simulated seconds elapsed at the end of the tick.
    pub elapsed_secs: f64,
    /// Events dispatched to agents this tick.
    pub events:       usize,
    /// Agents still in the simulation, dead or alive.
    pub live_agents:  usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for each behavior state change, in the order they happened.
    ///
    /// Changes made outside the tick loop (activation at build time, damage
    /// applied between ticks) are reported with the next tick.
    fn on_transition(&mut self, _record: &TransitionRecord) {}

    /// Called when an agent leaves the simulation.
    fn on_agent_removed(&mut self, _tick: Tick, _agent: AgentId) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
