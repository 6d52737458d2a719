//! The entity registry: every agent, target and prop with its position.

use hd_behavior::EntityDirectory;
use hd_core::{AgentId, EntityId, Point3};

/// What an entity is.  Decided once, at registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// A behavior-driven agent.
    Agent(AgentId),
    /// Something agents chase, e.g. a player.
    Target,
    /// Scenery.  Seen, never chased.
    Prop,
}

/// A scripted route a target walks in a loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Patrol {
    pub waypoints: Vec<Point3>,
    /// Units per second.
    pub speed:     f32,
    next:          usize,
}

impl Patrol {
    pub fn new(waypoints: Vec<Point3>, speed: f32) -> Self {
        Self { waypoints, speed, next: 0 }
    }
}

#[derive(Clone, Debug)]
pub struct EntityRecord {
    pub kind:      EntityKind,
    pub position:  Point3,
    /// Resolved from `kind` at registration.
    pub pursuable: bool,
    pub patrol:    Option<Patrol>,
}

/// Dense registry indexed by `EntityId`.  Despawned slots stay `None`; ids are
/// never reused.
#[derive(Default)]
pub struct World {
    entities: Vec<Option<EntityRecord>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: EntityKind, position: Point3) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(Some(EntityRecord {
            kind,
            position,
            pursuable: kind == EntityKind::Target,
            patrol: None,
        }));
        id
    }

    pub fn despawn(&mut self, entity: EntityId) -> Option<EntityRecord> {
        self.entities.get_mut(entity.index()).and_then(Option::take)
    }

    #[inline]
    pub fn get(&self, entity: EntityId) -> Option<&EntityRecord> {
        self.entities.get(entity.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut EntityRecord> {
        self.entities.get_mut(entity.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn position(&self, entity: EntityId) -> Option<Point3> {
        self.get(entity).map(|r| r.position)
    }

    /// Returns `false` if the entity doesn't exist.
    pub fn set_position(&mut self, entity: EntityId, position: Point3) -> bool {
        match self.get_mut(entity) {
            Some(r) => {
                r.position = position;
                true
            }
            None => false,
        }
    }

    /// Live entities, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &EntityRecord)> {
        self.entities
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (EntityId(i as u32), r)))
    }

    pub fn len(&self) -> usize {
        self.entities.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walk every patrolling entity `dt_secs` along its route.
    pub fn advance_patrols(&mut self, dt_secs: f32) {
        for record in self.entities.iter_mut().flatten() {
            let Some(patrol) = record.patrol.as_mut() else { continue };
            let Some(&goal) = patrol.waypoints.get(patrol.next) else { continue };
            record.position = record.position.step_toward(goal, patrol.speed * dt_secs);
            if record.position == goal {
                patrol.next = (patrol.next + 1) % patrol.waypoints.len();
            }
        }
    }
}

impl EntityDirectory for World {
    fn is_pursuable(&self, entity: EntityId) -> bool {
        self.get(entity).is_some_and(|r| r.pursuable)
    }
}
