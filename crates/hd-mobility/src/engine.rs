//! High-level navigation engine: accepts move requests and advances agents.

use hd_behavior::{MoveOutcome, NavigationService};
use hd_core::{AgentId, EntityId, Point3, RequestId};

use crate::{ActiveRequest, MobilityError, MobilityResult, MobilityStore, MoveGoal, MovementState, NavConfig};

/// A request reaching a terminal outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub agent:   AgentId,
    pub request: RequestId,
    pub outcome: MoveOutcome,
}

/// Straight-line navigation over a [`MobilityStore`].
///
/// Completions produced outside [`advance`](Self::advance) (supersession,
/// `stop`, out-of-bounds goals) are queued and handed out by the next
/// `advance`, so every completion reaches its agent on a later dispatch than
/// the call that caused it.
pub struct NavigationEngine {
    pub config: NavConfig,
    pub store:  MobilityStore,

    next_request: RequestId,
    pending:      Vec<Completion>,
}

impl NavigationEngine {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            store:        MobilityStore::new(),
            next_request: RequestId(0),
            pending:      Vec::new(),
        }
    }

    /// Teleport `agent` to `position` (initial placement).  Any live request
    /// is dropped without a completion.
    pub fn place(&mut self, agent: AgentId, position: Point3) {
        self.store.insert(agent, MovementState::stationary(position));
    }

    /// Forget `agent`.  Its live request, if any, is dropped silently.
    pub fn remove(&mut self, agent: AgentId) {
        self.store.remove(agent);
        self.pending.retain(|c| c.agent != agent);
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Point3> {
        self.store.get(agent).map(|s| s.position)
    }

    #[inline]
    pub fn heading(&self, agent: AgentId) -> Option<f32> {
        self.store.get(agent).map(|s| s.heading)
    }

    /// The agent's live request, if it is moving.
    #[inline]
    pub fn active_request(&self, agent: AgentId) -> Option<ActiveRequest> {
        self.store.get(agent).and_then(|s| s.request)
    }

    /// Start moving `agent` toward `goal` at `speed` units per second.
    ///
    /// Supersedes the agent's live request, which completes `Aborted`.  A
    /// point goal outside the configured bounds is accepted but completes
    /// `Failed` straight away.
    pub fn request_move(&mut self, agent: AgentId, goal: MoveGoal, speed: f32) -> MobilityResult<RequestId> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(MobilityError::InvalidSpeed(agent, speed));
        }
        let state = self.store.get_mut(agent).ok_or(MobilityError::NotPlaced(agent))?;

        let id = self.next_request;
        self.next_request = id.next();

        if let Some(old) = state.request.take() {
            self.pending.push(Completion { agent, request: old.id, outcome: MoveOutcome::Aborted });
        }

        let out_of_bounds = match (goal, self.config.bounds) {
            (MoveGoal::Point(p), Some(bounds)) => !bounds.contains(p),
            _ => false,
        };
        if out_of_bounds {
            tracing::debug!("{}: goal {:?} outside navigation bounds", agent, goal);
            self.pending.push(Completion { agent, request: id, outcome: MoveOutcome::Failed });
        } else {
            state.request = Some(ActiveRequest { id, goal, speed });
        }
        Ok(id)
    }

    /// Stop `agent`; its live request completes `Aborted`.
    pub fn stop_agent(&mut self, agent: AgentId) {
        let Some(state) = self.store.get_mut(agent) else {
            return;
        };
        if let Some(old) = state.request.take() {
            self.pending.push(Completion { agent, request: old.id, outcome: MoveOutcome::Aborted });
        }
    }

    /// Step every moving agent by `dt_secs` and return all completions since
    /// the previous call.
    ///
    /// `resolve` maps an entity goal to its current position; `None` means
    /// the entity is gone and the request fails.
    pub fn advance<F>(&mut self, dt_secs: f32, resolve: F) -> Vec<Completion>
    where
        F: Fn(EntityId) -> Option<Point3>,
    {
        let mut completions = std::mem::take(&mut self.pending);
        let acceptance = self.config.acceptance_radius;
        let follow = self.config.follow_distance;

        for (i, slot) in self.store.states.iter_mut().enumerate() {
            let Some(state) = slot.as_mut() else { continue };
            let Some(request) = state.request else { continue };
            let agent = AgentId(i as u32);
            let max_step = request.speed * dt_secs;

            let outcome = match request.goal {
                MoveGoal::Point(goal) => {
                    state.face(goal);
                    state.position = state.position.step_toward(goal, max_step);
                    (state.position.distance(goal) <= acceptance).then_some(MoveOutcome::Succeeded)
                }
                MoveGoal::Entity(target) => match resolve(target) {
                    None => Some(MoveOutcome::Failed),
                    Some(goal) => {
                        state.face(goal);
                        let gap = state.position.distance(goal) - follow;
                        if gap > 0.0 {
                            state.position = state.position.step_toward(goal, max_step.min(gap));
                        }
                        None
                    }
                },
            };

            if let Some(outcome) = outcome {
                state.request = None;
                completions.push(Completion { agent, request: request.id, outcome });
            }
        }
        completions
    }
}

impl NavigationService for NavigationEngine {
    fn move_to_point(&mut self, agent: AgentId, point: Point3, speed: f32) -> Option<RequestId> {
        self.request_move(agent, MoveGoal::Point(point), speed)
            .map_err(|e| tracing::warn!("{}: move request rejected: {}", agent, e))
            .ok()
    }

    fn move_to_entity(&mut self, agent: AgentId, target: EntityId, speed: f32) -> Option<RequestId> {
        self.request_move(agent, MoveGoal::Entity(target), speed)
            .map_err(|e| tracing::warn!("{}: move request rejected: {}", agent, e))
            .ok()
    }

    fn stop(&mut self, agent: AgentId) {
        self.stop_agent(agent);
    }
}
