//! `BehaviorController`: the reaction handlers of the agent state machine.
//!
//! # Transitions
//!
//! ```text
//!   activate ──► resolve ──► ROAM ◄──────────────┐
//!                  │          │ move completed   │ roam timer
//!                  ▼          ▼ (delay > 0)      │
//!                 IDLE ◄───── IDLE ──────────────┘
//!
//!   IDLE/ROAM ── target perceived ──► CHASE ── proximity enter ──► ATTACK
//!                                       ▲ ◄───── proximity exit ─────┘
//!                                       │
//!   CHASE/ATTACK ── target lost ──► IDLE ── post-chase timer ──► resolve
//! ```
//!
//! "Resolve" is the idle-or-roam step: roam if the agent may roam (moving the
//! home point to the current position when a chase just ended), otherwise
//! idle without movement.
//!
//! # Ownership
//!
//! The controller owns its agent's single outstanding movement request id and
//! both pending timer handles.  Completions and firings that don't match the
//! stored id/handle are stale and ignored.  [`AgentState`] is owned by the
//! [`Agent`](crate::Agent) and lent to each handler.

use hd_core::{AgentId, EntityId, Point3, RequestId, TimerHandle};

use crate::{AgentContext, AgentState, BehaviorState, MoveOutcome, Stimulus, TimerKind};

pub struct BehaviorController {
    agent:        AgentId,
    active_move:  Option<RequestId>,
    roam_timer:   Option<TimerHandle>,
    chase_timer:  Option<TimerHandle>,
    chase_target: Option<EntityId>,
}

impl BehaviorController {
    pub fn new(agent: AgentId) -> Self {
        Self {
            agent,
            active_move:  None,
            roam_timer:   None,
            chase_timer:  None,
            chase_target: None,
        }
    }

    #[inline]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// The movement request whose completion is currently actionable.
    #[inline]
    pub fn active_move(&self) -> Option<RequestId> {
        self.active_move
    }

    #[inline]
    pub fn roam_timer(&self) -> Option<TimerHandle> {
        self.roam_timer
    }

    #[inline]
    pub fn chase_timer(&self) -> Option<TimerHandle> {
        self.chase_timer
    }

    #[inline]
    pub fn chase_target(&self) -> Option<EntityId> {
        self.chase_target
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Take control of the agent: runs the resolution step once.
    pub fn activate(&mut self, st: &mut AgentState, cx: &mut AgentContext<'_>) {
        if st.is_dead() {
            return;
        }
        self.resolve(st, cx);
    }

    /// Release control: cancel both timers and stop any movement.
    ///
    /// The controller issues nothing afterwards; the agent drops it.
    pub fn detach(&mut self, cx: &mut AgentContext<'_>) {
        self.cancel_roam_timer(cx);
        self.cancel_chase_timer(cx);
        self.stop_movement(cx);
        self.chase_target = None;
    }

    // ── Reactions ─────────────────────────────────────────────────────────────

    /// A perception update for `entity`.
    ///
    /// Presence is decided by the currently-perceived set, not by the
    /// stimulus kind.
    pub fn on_perception(
        &mut self,
        st:       &mut AgentState,
        entity:   EntityId,
        stimulus: &Stimulus,
        cx:       &mut AgentContext<'_>,
    ) {
        if st.is_dead() {
            return;
        }
        let perceived = cx
            .perception
            .currently_perceived(self.agent, stimulus.sense)
            .contains(&entity);

        if !perceived {
            // The chase target is checked first: a despawned target is no
            // longer pursuable but its loss still ends the chase.
            let chasing = matches!(st.state(), BehaviorState::Chase | BehaviorState::Attack);
            if chasing {
                if self.chase_target == Some(entity) {
                    self.stop_chase(st, cx);
                }
            } else if cx.directory.is_pursuable(entity) {
                self.stop_movement(cx);
                self.resolve(st, cx);
            } else {
                tracing::trace!("{}: ignoring loss of non-pursuable {}", self.agent, entity);
            }
            return;
        }

        if matches!(st.state(), BehaviorState::Chase | BehaviorState::Attack) {
            return;
        }
        if !cx.directory.is_pursuable(entity) {
            tracing::trace!("{}: ignoring non-pursuable {}", self.agent, entity);
            return;
        }
        self.chase(st, entity, cx);
    }

    /// A movement request reached a terminal outcome.
    ///
    /// Only the active request counts; every outcome of a ROAM leg is handled
    /// alike so an unreachable destination doesn't strand the agent.
    pub fn on_move_completed(
        &mut self,
        st:      &mut AgentState,
        request: RequestId,
        outcome: MoveOutcome,
        cx:      &mut AgentContext<'_>,
    ) {
        if st.is_dead() {
            return;
        }
        if self.active_move != Some(request) {
            tracing::debug!("{}: stale completion {} ({:?})", self.agent, request, outcome);
            return;
        }
        self.active_move = None;
        if st.state() != BehaviorState::Roam {
            return;
        }

        let delay = st.tuning().roam_delay_secs;
        if delay > 0.0 {
            self.enter(st, BehaviorState::Idle);
            self.cancel_roam_timer(cx);
            self.roam_timer = cx.timers.schedule(self.agent, delay, TimerKind::RoamResume);
            if self.roam_timer.is_none() {
                tracing::warn!("{}: timer service unavailable, roam resume skipped", self.agent);
            }
        } else {
            self.roam(st, cx);
        }
    }

    /// A controller-owned timer fired.
    pub fn on_timer(
        &mut self,
        st:     &mut AgentState,
        handle: TimerHandle,
        kind:   TimerKind,
        cx:     &mut AgentContext<'_>,
    ) {
        if st.is_dead() {
            return;
        }
        match kind {
            TimerKind::RoamResume => {
                if self.roam_timer != Some(handle) {
                    tracing::debug!("{}: stale roam timer {}", self.agent, handle);
                    return;
                }
                self.roam_timer = None;
                if st.state() == BehaviorState::Idle {
                    self.roam(st, cx);
                }
            }
            TimerKind::PostChase => {
                if self.chase_timer != Some(handle) {
                    tracing::debug!("{}: stale post-chase timer {}", self.agent, handle);
                    return;
                }
                self.chase_timer = None;
                self.resolve(st, cx);
            }
            // Agent-owned.
            TimerKind::DeathAnimation | TimerKind::Destroy => {}
        }
    }

    /// `entity` entered the proximity volume.  CHASE → ATTACK, movement untouched.
    pub fn on_proximity_enter(&mut self, st: &mut AgentState, entity: EntityId, cx: &mut AgentContext<'_>) {
        if st.state() != BehaviorState::Chase || !cx.directory.is_pursuable(entity) {
            return;
        }
        self.enter(st, BehaviorState::Attack);
    }

    /// `entity` left the proximity volume.  ATTACK → CHASE with a fresh request.
    pub fn on_proximity_exit(&mut self, st: &mut AgentState, entity: EntityId, cx: &mut AgentContext<'_>) {
        if st.state() != BehaviorState::Attack || !cx.directory.is_pursuable(entity) {
            return;
        }
        self.chase(st, entity, cx);
    }

    // ── Steps ─────────────────────────────────────────────────────────────────

    /// Idle-or-roam.
    fn resolve(&mut self, st: &mut AgentState, cx: &mut AgentContext<'_>) {
        self.cancel_chase_timer(cx);
        if !st.tuning().can_roam {
            self.enter(st, BehaviorState::Idle);
            return;
        }
        if Self::leaving_chase(st) {
            st.set_home_point(cx.position);
            tracing::debug!("{}: home point moved to {}", self.agent, cx.position);
        }
        self.roam(st, cx);
    }

    /// True while a chase is ending: still CHASE/ATTACK, or idling in the
    /// post-chase pause.
    fn leaving_chase(st: &AgentState) -> bool {
        let chasing = |s: BehaviorState| matches!(s, BehaviorState::Chase | BehaviorState::Attack);
        chasing(st.state()) || (st.state() == BehaviorState::Idle && chasing(st.previous_state()))
    }

    fn roam(&mut self, st: &mut AgentState, cx: &mut AgentContext<'_>) {
        self.cancel_roam_timer(cx);
        self.enter(st, BehaviorState::Roam);

        let home = st.home_point();
        let radius = st.tuning().roam_radius.max(0.0);
        let corner = Point3::new(home.x + radius, home.y + radius, home.z);
        let destination = cx.rng.point_in_box(home, corner);

        self.active_move = cx.navigation.move_to_point(self.agent, destination, st.max_speed());
        if self.active_move.is_none() {
            tracing::warn!("{}: navigation unavailable, roam leg skipped", self.agent);
        }
    }

    fn chase(&mut self, st: &mut AgentState, target: EntityId, cx: &mut AgentContext<'_>) {
        self.cancel_roam_timer(cx);
        self.cancel_chase_timer(cx);
        self.enter(st, BehaviorState::Chase);
        self.chase_target = Some(target);

        self.active_move = cx.navigation.move_to_entity(self.agent, target, st.max_speed());
        if self.active_move.is_none() {
            tracing::warn!("{}: navigation unavailable, chase of {} skipped", self.agent, target);
        }
    }

    fn stop_chase(&mut self, st: &mut AgentState, cx: &mut AgentContext<'_>) {
        self.stop_movement(cx);
        self.chase_target = None;

        let delay = st.tuning().after_chase_delay_secs;
        if delay > 0.0 {
            self.enter(st, BehaviorState::Idle);
            self.cancel_chase_timer(cx);
            self.chase_timer = cx.timers.schedule(self.agent, delay, TimerKind::PostChase);
            if self.chase_timer.is_none() {
                tracing::warn!("{}: timer service unavailable, post-chase resume skipped", self.agent);
            }
        } else {
            self.resolve(st, cx);
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn enter(&self, st: &mut AgentState, to: BehaviorState) {
        let from = st.state();
        if st.transition(to) {
            tracing::debug!("{}: {} -> {}", self.agent, from, to);
        }
    }

    fn stop_movement(&mut self, cx: &mut AgentContext<'_>) {
        self.active_move = None;
        cx.navigation.stop(self.agent);
    }

    fn cancel_roam_timer(&mut self, cx: &mut AgentContext<'_>) {
        if let Some(handle) = self.roam_timer.take() {
            cx.timers.cancel(handle);
        }
    }

    fn cancel_chase_timer(&mut self, cx: &mut AgentContext<'_>) {
        if let Some(handle) = self.chase_timer.take() {
            cx.timers.cancel(handle);
        }
    }
}
