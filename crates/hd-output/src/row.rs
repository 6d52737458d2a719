//! Plain data row types written by output backends.

use hd_behavior::BehaviorState;
use hd_sim::{TickSummary, TransitionRecord};

/// One behavior state change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub from:     BehaviorState,
    pub to:       BehaviorState,
    /// Health right after the change; negative once killed by overkill.
    pub health:   f32,
}

impl From<&TransitionRecord> for TransitionRow {
    fn from(r: &TransitionRecord) -> Self {
        Self { tick: r.tick.0, agent_id: r.agent.0, from: r.from, to: r.to, health: r.health }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    pub events:       u64,
    pub live_agents:  u64,
}

impl TickSummaryRow {
    pub fn new(tick: u64, summary: &TickSummary) -> Self {
        Self {
            tick,
            elapsed_secs: summary.elapsed_secs,
            events:       summary.events as u64,
            live_agents:  summary.live_agents as u64,
        }
    }
}
