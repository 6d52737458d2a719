//! Stand-ins for absent services.

use hd_core::{AgentId, EntityId, Point3, RequestId, TimerHandle};

use crate::{NavigationService, PerceptionQuery, SenseKind, TimerKind, TimerService};

/// A [`TimerService`] that never schedules anything.
pub struct NoTimers;

impl TimerService for NoTimers {
    fn schedule(&mut self, _owner: AgentId, _delay_secs: f32, _kind: TimerKind) -> Option<TimerHandle> {
        None
    }

    fn cancel(&mut self, _handle: TimerHandle) {}
}

/// A [`NavigationService`] that refuses every request.
///
/// Agents driven with it still change state; they just never move.
pub struct NoNavigation;

impl NavigationService for NoNavigation {
    fn move_to_point(&mut self, _agent: AgentId, _point: Point3, _speed: f32) -> Option<RequestId> {
        None
    }

    fn move_to_entity(&mut self, _agent: AgentId, _target: EntityId, _speed: f32) -> Option<RequestId> {
        None
    }

    fn stop(&mut self, _agent: AgentId) {}
}

/// A [`PerceptionQuery`] under which nothing is ever perceived.
pub struct NoPerception;

impl PerceptionQuery for NoPerception {
    fn currently_perceived(&self, _agent: AgentId, _sense: SenseKind) -> Vec<EntityId> {
        vec![]
    }
}
