//! Overlap tracking for an agent's proximity volume.

use std::collections::BTreeSet;

use hd_core::{EntityId, Point3};

use crate::ProximityVolume;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProximityEvent {
    Enter(EntityId),
    Exit(EntityId),
}

/// The set of entities overlapping one agent's volume.
#[derive(Clone, Debug, Default)]
pub struct ProximityTracker {
    overlapping: BTreeSet<EntityId>,
}

impl ProximityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff this tick's overlaps against the last.  `candidates` should hold
    /// every entity within [`ProximityVolume::reach`] of `origin`, the agent
    /// itself excluded.  Exits are reported before enters.
    pub fn update(
        &mut self,
        origin:     Point3,
        heading:    f32,
        volume:     &ProximityVolume,
        candidates: &[(EntityId, Point3)],
    ) -> Vec<ProximityEvent> {
        let now: BTreeSet<EntityId> = candidates
            .iter()
            .filter(|&&(_, p)| volume.contains(origin, heading, p))
            .map(|&(e, _)| e)
            .collect();

        let mut events: Vec<ProximityEvent> = self
            .overlapping
            .difference(&now)
            .map(|&e| ProximityEvent::Exit(e))
            .collect();
        events.extend(now.difference(&self.overlapping).map(|&e| ProximityEvent::Enter(e)));

        self.overlapping = now;
        events
    }

    #[inline]
    pub fn is_overlapping(&self, entity: EntityId) -> bool {
        self.overlapping.contains(&entity)
    }

    pub fn overlapping(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.overlapping.iter().copied()
    }
}
