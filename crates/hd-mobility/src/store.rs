//! The `MobilityStore`: movement state for every placed agent.

use hd_core::AgentId;

use crate::MovementState;

/// Dense per-agent movement state, indexed by `AgentId`.  Slots of agents
/// never placed, or already removed, are `None`.
#[derive(Default)]
pub struct MobilityStore {
    pub states: Vec<Option<MovementState>>,
}

impl MobilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `agent` into the store, growing it as needed.
    pub fn insert(&mut self, agent: AgentId, state: MovementState) {
        let i = agent.index();
        if self.states.len() <= i {
            self.states.resize(i + 1, None);
        }
        self.states[i] = Some(state);
    }

    pub fn remove(&mut self, agent: AgentId) -> Option<MovementState> {
        self.states.get_mut(agent.index()).and_then(Option::take)
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&MovementState> {
        self.states.get(agent.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut MovementState> {
        self.states.get_mut(agent.index()).and_then(Option::as_mut)
    }

    /// `(AgentId, state)` for every placed agent, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &MovementState)> {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (AgentId(i as u32), s)))
    }

    /// Number of agents currently moving.
    pub fn moving_count(&self) -> usize {
        self.states.iter().flatten().filter(|s| s.is_moving()).count()
    }
}
