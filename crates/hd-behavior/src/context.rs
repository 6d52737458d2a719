//! Services handed to every reaction.

use hd_core::{AgentRng, Point3, Tick};

use crate::{EntityDirectory, NavigationService, PerceptionQuery, TimerService};

/// Everything a reaction may touch besides the agent's own state.
///
/// Built by `hd-sim` for each dispatched event and dropped afterwards; events
/// for one agent are never dispatched concurrently, so the mutable service
/// borrows are exclusive for the whole reaction.
pub struct AgentContext<'a> {
    /// Tick the event is dispatched in.
    pub tick: Tick,

    /// The agent's current position.  Captured as the new home point when a
    /// chase ends.
    pub position: Point3,

    pub timers:     &'a mut dyn TimerService,
    pub navigation: &'a mut dyn NavigationService,
    pub perception: &'a dyn PerceptionQuery,
    pub directory:  &'a dyn EntityDirectory,

    /// The agent's own RNG; roam destinations are drawn from it.
    pub rng: &'a mut AgentRng,
}

impl<'a> AgentContext<'a> {
    #[inline]
    pub fn new(
        tick:       Tick,
        position:   Point3,
        timers:     &'a mut dyn TimerService,
        navigation: &'a mut dyn NavigationService,
        perception: &'a dyn PerceptionQuery,
        directory:  &'a dyn EntityDirectory,
        rng:        &'a mut AgentRng,
    ) -> Self {
        Self { tick, position, timers, navigation, perception, directory, rng }
    }
}
