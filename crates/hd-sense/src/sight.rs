//! One agent's sight memory.

use std::collections::BTreeMap;

use hd_behavior::{Stimulus, StimulusKind};
use hd_core::{EntityId, Point3, Tick};

use crate::SightConfig;

#[derive(Clone, Debug)]
struct Memory {
    location: Point3,
    sensed:   bool,
    /// Tick the entity stopped being sensed.
    lost_at:  Tick,
}

/// Everything one agent currently sees or recently saw.
#[derive(Clone, Debug, Default)]
pub struct SightSense {
    memory: BTreeMap<EntityId, Memory>,
}

impl SightSense {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate against this tick's `candidates`: every entity within the
    /// lose-sight radius of `observer`, itself excluded.
    ///
    /// Returns the stimuli produced, ascending by entity id.  `max_age_ticks`
    /// of `0` remembers lost entities forever.
    pub fn update(
        &mut self,
        observer:      Point3,
        candidates:    &[(EntityId, Point3)],
        config:        &SightConfig,
        now:           Tick,
        max_age_ticks: u64,
    ) -> Vec<(EntityId, Stimulus)> {
        let sight_sq = config.sight_radius * config.sight_radius;
        let lose_sq = config.lose_sight_radius * config.lose_sight_radius;
        let mut stimuli = Vec::new();
        let mut still_sensed = Vec::with_capacity(candidates.len());

        for &(entity, location) in candidates {
            let dist_sq = observer.distance_sq(location);
            let sensed = self.memory.get(&entity).is_some_and(|m| m.sensed);
            if sensed && dist_sq <= lose_sq {
                still_sensed.push(entity);
                if let Some(m) = self.memory.get_mut(&entity) {
                    m.location = location;
                }
            } else if !sensed && dist_sq <= sight_sq {
                still_sensed.push(entity);
                self.memory.insert(entity, Memory { location, sensed: true, lost_at: now });
                stimuli.push((entity, Stimulus::sight(StimulusKind::Detected, location)));
            }
        }

        for (&entity, m) in self.memory.iter_mut() {
            if m.sensed && !still_sensed.contains(&entity) {
                m.sensed = false;
                m.lost_at = now;
                stimuli.push((entity, Stimulus::sight(StimulusKind::Lost, m.location)));
            }
        }

        if max_age_ticks > 0 {
            self.memory.retain(|_, m| m.sensed || now.since(m.lost_at) < max_age_ticks);
        }

        stimuli.sort_by_key(|&(entity, _)| entity);
        stimuli
    }

    /// Entities currently sensed, ascending by id.
    pub fn currently_perceived(&self) -> Vec<EntityId> {
        self.memory.iter().filter(|(_, m)| m.sensed).map(|(&e, _)| e).collect()
    }

    #[inline]
    pub fn is_sensed(&self, entity: EntityId) -> bool {
        self.memory.get(&entity).is_some_and(|m| m.sensed)
    }

    /// Entities sensed or still remembered.
    pub fn known_count(&self) -> usize {
        self.memory.len()
    }
}
