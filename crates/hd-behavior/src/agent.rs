//! `Agent`: the controlled character: state, controller, death and removal.

use hd_core::{AgentId, EntityId, Point3, TimerHandle};

use crate::{
    AgentContext, AgentEvent, AgentState, AgentTuning, BehaviorController, BehaviorState,
    DamageOutcome, TimerKind,
};

/// What [`Agent::schedule_destroy`] decided.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Removal {
    /// Remove at the end of the current tick.
    Now,
    /// Remove when the destroy timer fires.
    Scheduled(TimerHandle),
    /// Keep the corpse; something else owns its fate.
    Never,
}

pub struct Agent {
    id:              AgentId,
    entity:          EntityId,
    state:           AgentState,
    controller:      Option<BehaviorController>,
    death_timer:     Option<TimerHandle>,
    destroy_timer:   Option<TimerHandle>,
    pending_removal: bool,
}

impl Agent {
    /// A freshly spawned agent: IDLE at `spawn_point`, controller attached but
    /// not yet activated.
    pub fn spawn(id: AgentId, entity: EntityId, spawn_point: Point3, tuning: AgentTuning) -> Self {
        Self {
            id,
            entity,
            state:           AgentState::spawn(spawn_point, tuning),
            controller:      Some(BehaviorController::new(id)),
            death_timer:     None,
            destroy_timer:   None,
            pending_removal: false,
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The world entity representing this agent.
    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    #[inline]
    pub fn controller(&self) -> Option<&BehaviorController> {
        self.controller.as_ref()
    }

    /// Whether a controller is still attached (false from death onwards).
    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.controller.is_some()
    }

    /// Set once the agent should leave the simulation; consumed by the owner.
    #[inline]
    pub fn pending_removal(&self) -> bool {
        self.pending_removal
    }

    /// Let the controller take over (runs its resolution step).
    pub fn activate(&mut self, cx: &mut AgentContext<'_>) {
        if let Some(controller) = self.controller.as_mut() {
            controller.activate(&mut self.state, cx);
        }
    }

    /// Route one event to the agent or its controller.
    pub fn handle(&mut self, event: &AgentEvent, cx: &mut AgentContext<'_>) {
        match *event {
            AgentEvent::Damage(amount) => {
                self.apply_damage(amount, cx);
            }
            AgentEvent::Timer { handle, kind: TimerKind::DeathAnimation } => {
                if self.death_timer != Some(handle) {
                    return;
                }
                self.death_timer = None;
                let delay = self.state.tuning().post_death_destroy_secs;
                self.schedule_destroy(delay, cx);
            }
            AgentEvent::Timer { handle, kind: TimerKind::Destroy } => {
                if self.destroy_timer == Some(handle) {
                    self.destroy_timer = None;
                    self.pending_removal = true;
                }
            }
            _ => self.dispatch_to_controller(event, cx),
        }
    }

    fn dispatch_to_controller(&mut self, event: &AgentEvent, cx: &mut AgentContext<'_>) {
        let Some(controller) = self.controller.as_mut() else {
            tracing::trace!("{}: dropped {:?} after detach", self.id, event);
            return;
        };
        let st = &mut self.state;
        match *event {
            AgentEvent::Perception { entity, ref stimulus } => {
                controller.on_perception(st, entity, stimulus, cx)
            }
            AgentEvent::MoveCompleted { request, outcome } => {
                controller.on_move_completed(st, request, outcome, cx)
            }
            AgentEvent::Timer { handle, kind } => controller.on_timer(st, handle, kind, cx),
            AgentEvent::ProximityEnter(entity) => controller.on_proximity_enter(st, entity, cx),
            AgentEvent::ProximityExit(entity) => controller.on_proximity_exit(st, entity, cx),
            AgentEvent::Damage(_) => {}
        }
    }

    /// Subtract `amount` from health.  Crossing zero detaches the controller,
    /// enters DEAD and starts the dying animation timer, exactly once.
    pub fn apply_damage(&mut self, amount: f32, cx: &mut AgentContext<'_>) -> DamageOutcome {
        let outcome = self.state.take_damage(amount);
        if outcome != DamageOutcome::Killed {
            return outcome;
        }

        if let Some(mut controller) = self.controller.take() {
            controller.detach(cx);
        }
        let from = self.state.state();
        self.state.transition(BehaviorState::Dead);
        tracing::info!("{}: {} -> dead (health {})", self.id, from, self.state.health());

        let dying = self.state.tuning().dying_animation_secs;
        self.death_timer = cx.timers.schedule(self.id, dying, TimerKind::DeathAnimation);
        if self.death_timer.is_none() {
            tracing::warn!("{}: timer service unavailable, corpse will not be removed", self.id);
        }
        outcome
    }

    /// Arrange removal after `delay_secs`: zero removes now, positive arms the
    /// destroy timer, negative never removes.
    pub fn schedule_destroy(&mut self, delay_secs: f32, cx: &mut AgentContext<'_>) -> Removal {
        if delay_secs < 0.0 {
            return Removal::Never;
        }
        if delay_secs == 0.0 {
            self.pending_removal = true;
            tracing::info!("{}: removal pending", self.id);
            return Removal::Now;
        }
        if let Some(old) = self.destroy_timer.take() {
            cx.timers.cancel(old);
        }
        match cx.timers.schedule(self.id, delay_secs, TimerKind::Destroy) {
            Some(handle) => {
                self.destroy_timer = Some(handle);
                Removal::Scheduled(handle)
            }
            None => {
                tracing::warn!("{}: timer service unavailable, destroy skipped", self.id);
                Removal::Never
            }
        }
    }
}
