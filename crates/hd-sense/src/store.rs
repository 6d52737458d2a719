//! The `SensoryStore`: sight memory and proximity overlap for every agent.

use hd_behavior::{PerceptionQuery, SenseKind, Stimulus};
use hd_core::time::ticks_for_secs;
use hd_core::{AgentId, EntityId, Point3, Tick};

use crate::{ProximityEvent, ProximityTracker, ProximityVolume, SenseResult, SightConfig, SightSense, SpatialIndex};

/// Where a sensing agent is this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observer {
    /// The agent's own world entity, excluded from its candidates.
    pub entity:   EntityId,
    pub position: Point3,
    pub heading:  f32,
}

/// Per-agent senses, indexed by `AgentId`.  Slots of unregistered agents are
/// `None`.
pub struct SensoryStore {
    pub sight_config: SightConfig,
    pub volume:       ProximityVolume,

    max_age_ticks: u64,
    sight:         Vec<Option<SightSense>>,
    proximity:     Vec<Option<ProximityTracker>>,
}

impl SensoryStore {
    pub fn new(sight_config: SightConfig, volume: ProximityVolume, tick_duration_ms: u32) -> SenseResult<Self> {
        sight_config.validate()?;
        volume.validate()?;
        let max_age_ticks = ticks_for_secs(sight_config.max_age_secs, tick_duration_ms);
        Ok(Self {
            sight_config,
            volume,
            max_age_ticks,
            sight:     Vec::new(),
            proximity: Vec::new(),
        })
    }

    /// Give `agent` fresh senses.
    pub fn register(&mut self, agent: AgentId) {
        let i = agent.index();
        if self.sight.len() <= i {
            self.sight.resize(i + 1, None);
            self.proximity.resize(i + 1, None);
        }
        self.sight[i] = Some(SightSense::new());
        self.proximity[i] = Some(ProximityTracker::new());
    }

    /// Drop `agent`'s senses; it produces no further stimuli or overlaps.
    pub fn remove(&mut self, agent: AgentId) {
        if let Some(slot) = self.sight.get_mut(agent.index()) {
            *slot = None;
        }
        if let Some(slot) = self.proximity.get_mut(agent.index()) {
            *slot = None;
        }
    }

    #[inline]
    pub fn sight(&self, agent: AgentId) -> Option<&SightSense> {
        self.sight.get(agent.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn proximity(&self, agent: AgentId) -> Option<&ProximityTracker> {
        self.proximity.get(agent.index()).and_then(Option::as_ref)
    }

    /// Update every agent's sight memory and return the stimuli, ascending by
    /// agent then entity.
    ///
    /// `locate` yields the observer for a registered agent, or `None` to skip
    /// it this tick.
    pub fn sense_all<F>(&mut self, index: &SpatialIndex, now: Tick, locate: F) -> Vec<(AgentId, EntityId, Stimulus)>
    where
        F: Fn(AgentId) -> Option<Observer> + Sync,
    {
        let config = &self.sight_config;
        let max_age = self.max_age_ticks;

        #[cfg(not(feature = "parallel"))]
        let per_agent: Vec<Vec<(AgentId, EntityId, Stimulus)>> = self
            .sight
            .iter_mut()
            .enumerate()
            .map(|(i, slot)| sense_one(AgentId(i as u32), slot, index, config, now, max_age, &locate))
            .collect();

        #[cfg(feature = "parallel")]
        let per_agent: Vec<Vec<(AgentId, EntityId, Stimulus)>> = {
            use rayon::prelude::*;

            self.sight
                .par_iter_mut()
                .enumerate()
                .map(|(i, slot)| sense_one(AgentId(i as u32), slot, index, config, now, max_age, &locate))
                .collect()
        };

        per_agent.into_iter().flatten().collect()
    }

    /// Diff every agent's proximity overlaps and return the events, ascending
    /// by agent.
    pub fn proximity_all<F>(&mut self, index: &SpatialIndex, locate: F) -> Vec<(AgentId, ProximityEvent)>
    where
        F: Fn(AgentId) -> Option<Observer>,
    {
        let reach = self.volume.reach();
        let mut events = Vec::new();
        for (i, slot) in self.proximity.iter_mut().enumerate() {
            let agent = AgentId(i as u32);
            let (Some(tracker), Some(obs)) = (slot.as_mut(), locate(agent)) else { continue };
            let candidates: Vec<(EntityId, Point3)> = index
                .within(obs.position, reach)
                .into_iter()
                .filter(|&(e, _)| e != obs.entity)
                .collect();
            events.extend(
                tracker
                    .update(obs.position, obs.heading, &self.volume, &candidates)
                    .into_iter()
                    .map(|ev| (agent, ev)),
            );
        }
        events
    }
}

fn sense_one<F>(
    agent:   AgentId,
    slot:    &mut Option<SightSense>,
    index:   &SpatialIndex,
    config:  &SightConfig,
    now:     Tick,
    max_age: u64,
    locate:  &F,
) -> Vec<(AgentId, EntityId, Stimulus)>
where
    F: Fn(AgentId) -> Option<Observer>,
{
    let (Some(sense), Some(obs)) = (slot.as_mut(), locate(agent)) else {
        return Vec::new();
    };
    let candidates: Vec<(EntityId, Point3)> = index
        .within(obs.position, config.lose_sight_radius)
        .into_iter()
        .filter(|&(e, _)| e != obs.entity)
        .collect();
    let stimuli = sense.update(obs.position, &candidates, config, now, max_age);
    for (entity, stimulus) in &stimuli {
        tracing::trace!("{}: {:?} {} at {}", agent, stimulus.kind, entity, stimulus.location);
    }
    if !stimuli.is_empty() {
        tracing::debug!("{}: {} sight stimuli, {} entities known", agent, stimuli.len(), sense.known_count());
    }
    stimuli.into_iter().map(|(entity, stimulus)| (agent, entity, stimulus)).collect()
}

impl PerceptionQuery for SensoryStore {
    fn currently_perceived(&self, agent: AgentId, sense: SenseKind) -> Vec<EntityId> {
        match sense {
            SenseKind::Sight => self.sight(agent).map(SightSense::currently_perceived).unwrap_or_default(),
        }
    }
}
