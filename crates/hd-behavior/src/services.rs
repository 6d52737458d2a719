//! Contracts between the controller and the world around it.
//!
//! Every fallible call returns `Option`: `None` means the service is
//! unavailable and the controller skips the action (logging a warning)
//! instead of failing.

use hd_core::{AgentId, EntityId, Point3, RequestId, TimerHandle};

use crate::{SenseKind, TimerKind};

/// One-shot timers owned by agents.
pub trait TimerService {
    /// Fire `kind` for `owner` after `delay_secs` of simulated time.
    fn schedule(&mut self, owner: AgentId, delay_secs: f32, kind: TimerKind) -> Option<TimerHandle>;

    /// Cancel a pending timer.  Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Asynchronous movement.  Each agent has at most one live request; issuing a
/// new one supersedes the previous one, which completes `Aborted`.
pub trait NavigationService {
    fn move_to_point(&mut self, agent: AgentId, point: Point3, speed: f32) -> Option<RequestId>;

    fn move_to_entity(&mut self, agent: AgentId, target: EntityId, speed: f32) -> Option<RequestId>;

    /// Stop the agent's live request, if any.
    fn stop(&mut self, agent: AgentId);
}

/// The agent's currently-perceived set, per sense.
pub trait PerceptionQuery {
    fn currently_perceived(&self, agent: AgentId, sense: SenseKind) -> Vec<EntityId>;
}

/// Classification of world entities.
pub trait EntityDirectory {
    /// Whether `entity` is a legal chase target.
    fn is_pursuable(&self, entity: EntityId) -> bool;
}
