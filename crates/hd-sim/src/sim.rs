//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;

use hd_behavior::{Agent, AgentContext, AgentEvent, AgentTuning, BehaviorState, Channel, DamageOutcome, TimerKind};
use hd_core::{AgentId, AgentRng, EntityId, Point3, SimClock, SimConfig, Tick};
use hd_mobility::NavigationEngine;
use hd_schedule::TimerQueue;
use hd_sense::{Observer, SensoryStore, SpatialIndex};

use crate::world::Patrol;
use crate::{
    EntityKind, SimError, SimObserver, SimResult, SubscriptionToken, Subscriptions, TickSummary,
    TransitionRecord, World,
};

const ALL_CHANNELS: [Channel; 3] = [Channel::Perception, Channel::Navigation, Channel::Proximity];

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns every service and drives the seven-phase tick loop:
///
/// 1. **Navigation**: patrolling targets walk; agents step toward their goals;
///    completions are collected.
/// 2. **Sync**: agent positions are copied from navigation into the world.
/// 3. **Perception**: every controlled agent's sight is updated against an
///    R-tree of entity positions.
/// 4. **Proximity**: overlap enter/exit events for every controlled agent.
/// 5. **Timers**: due timers are drained.
/// 6. **Dispatch** (sequential, ascending `AgentId`): each agent handles its
///    events one at a time.  Requests and timers issued here surface on a
///    later tick.
/// 7. **Removals**: agents marked for removal leave the simulation.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, seed, tick duration).
    pub config: SimConfig,

    /// Simulation clock: the next tick to process.
    pub clock: SimClock,

    /// Every entity and its position.
    pub world: World,

    /// Agents indexed by `AgentId`; removed agents leave `None`.
    pub agents: Vec<Option<Agent>>,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: Vec<AgentRng>,

    pub timers:        TimerQueue<TimerKind>,
    pub navigation:    NavigationEngine,
    pub senses:        SensoryStore,
    pub subscriptions: Subscriptions,

    /// Tokens each agent holds, indexed by `AgentId`; handed back on detach.
    tokens: Vec<Vec<SubscriptionToken>>,

    /// Tuning for agents spawned without their own.
    pub default_tuning: AgentTuning,

    /// State changes not yet reported to an observer.
    transitions: Vec<TransitionRecord>,
}

impl Sim {
    pub(crate) fn new(
        config:         SimConfig,
        default_tuning: AgentTuning,
        timers:         TimerQueue<TimerKind>,
        navigation:     NavigationEngine,
        senses:         SensoryStore,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            world: World::new(),
            agents: Vec::new(),
            rngs: Vec::new(),
            timers,
            navigation,
            senses,
            subscriptions: Subscriptions::new(),
            tokens: Vec::new(),
            default_tuning,
            transitions: Vec::new(),
        }
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let (events, removed) = self.process_tick(now);
        for record in self.transitions.drain(..) {
            observer.on_transition(&record);
        }
        for agent in removed {
            observer.on_agent_removed(now, agent);
        }

        self.clock.advance();
        let summary = TickSummary {
            elapsed_secs: self.clock.elapsed_secs(),
            events,
            live_agents:  self.live_agent_count(),
        };
        observer.on_tick_end(now, &summary);
        Ok(())
    }

    // ── Spawning & external input ─────────────────────────────────────────

    /// Spawn an agent with the default tuning and activate its controller.
    pub fn spawn_agent(&mut self, position: Point3) -> SimResult<AgentId> {
        self.spawn_agent_with(position, self.default_tuning.clone())
    }

    pub fn spawn_agent_with(&mut self, position: Point3, tuning: AgentTuning) -> SimResult<AgentId> {
        let agent = self.insert_agent(position, tuning)?;
        self.activate(agent);
        Ok(agent)
    }

    pub fn spawn_target(&mut self, position: Point3) -> EntityId {
        self.world.spawn(EntityKind::Target, position)
    }

    /// A target walking `waypoints` in a loop at `speed` units per second.
    pub fn spawn_patrolling_target(&mut self, position: Point3, waypoints: Vec<Point3>, speed: f32) -> EntityId {
        let entity = self.world.spawn(EntityKind::Target, position);
        if let Some(record) = self.world.get_mut(entity) {
            if !waypoints.is_empty() {
                record.patrol = Some(Patrol::new(waypoints, speed));
            }
        }
        entity
    }

    pub fn spawn_prop(&mut self, position: Point3) -> EntityId {
        self.world.spawn(EntityKind::Prop, position)
    }

    /// Teleport a target or prop.  Agents only move through navigation.
    pub fn move_entity(&mut self, entity: EntityId, position: Point3) -> SimResult<()> {
        self.non_agent(entity)?;
        self.world.set_position(entity, position);
        Ok(())
    }

    /// Remove a target or prop.  Agents chasing it fail their request, and
    /// agents seeing it lose sight of it, on the next tick.
    pub fn despawn_entity(&mut self, entity: EntityId) -> SimResult<()> {
        self.non_agent(entity)?;
        self.world.despawn(entity);
        Ok(())
    }

    /// Damage `agent` now, outside the tick loop.
    pub fn apply_damage(&mut self, agent: AgentId, amount: f32) -> SimResult<DamageOutcome> {
        let now = self.clock.current_tick;
        self.timers.advance_to(now);
        self.with_agent(agent, now, |a, cx| a.apply_damage(amount, cx))
            .ok_or(SimError::UnknownAgent(agent))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn agent(&self, agent: AgentId) -> Option<&Agent> {
        self.agents.get(agent.index()).and_then(Option::as_ref)
    }

    /// Current behavior state of `agent`, `None` once removed.
    pub fn state(&self, agent: AgentId) -> Option<BehaviorState> {
        self.agent(agent).map(|a| a.state().state())
    }

    pub fn position(&self, agent: AgentId) -> Option<Point3> {
        self.navigation.position(agent)
    }

    /// Agents still in the simulation, dead or alive.
    pub fn live_agent_count(&self) -> usize {
        self.agents.iter().flatten().count()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Returns the number of events dispatched and the agents removed.
    fn process_tick(&mut self, now: Tick) -> (usize, Vec<AgentId>) {
        self.timers.advance_to(now);
        let dt = self.clock.delta_secs();
        let mut inbox: BTreeMap<AgentId, Vec<AgentEvent>> = BTreeMap::new();

        // ── Phase ①: navigation ───────────────────────────────────────────
        self.world.advance_patrols(dt);
        let world = &self.world;
        for c in self.navigation.advance(dt, |e| world.position(e)) {
            inbox
                .entry(c.agent)
                .or_default()
                .push(AgentEvent::MoveCompleted { request: c.request, outcome: c.outcome });
        }

        // ── Phase ②: sync positions ───────────────────────────────────────
        for (i, slot) in self.agents.iter().enumerate() {
            let Some(agent) = slot else { continue };
            if let Some(p) = self.navigation.position(AgentId(i as u32)) {
                self.world.set_position(agent.entity(), p);
            }
        }

        // ── Phase ③: perception ───────────────────────────────────────────
        let index = SpatialIndex::build(self.world.iter().map(|(id, r)| (id, r.position)));
        let observers = self.observers();
        let locate = |a: AgentId| observers.get(a.index()).copied().flatten();

        for (agent, entity, stimulus) in self.senses.sense_all(&index, now, locate) {
            inbox.entry(agent).or_default().push(AgentEvent::Perception { entity, stimulus });
        }

        // ── Phase ④: proximity ────────────────────────────────────────────
        for (agent, event) in self.senses.proximity_all(&index, locate) {
            let event = match event {
                hd_sense::ProximityEvent::Enter(e) => AgentEvent::ProximityEnter(e),
                hd_sense::ProximityEvent::Exit(e) => AgentEvent::ProximityExit(e),
            };
            inbox.entry(agent).or_default().push(event);
        }

        // ── Phase ⑤: timers ───────────────────────────────────────────────
        for fired in self.timers.drain_due() {
            inbox
                .entry(fired.owner)
                .or_default()
                .push(AgentEvent::Timer { handle: fired.handle, kind: fired.payload });
        }

        // ── Phase ⑥: dispatch ─────────────────────────────────────────────
        //
        // Ascending AgentId (BTreeMap order), one event at a time per agent.
        // A gated event is re-checked per event: an agent that dies mid-batch
        // drops the rest of its perception/navigation/proximity events.
        let mut dispatched = 0;
        for (agent, events) in inbox {
            for event in events {
                if let Some(channel) = event.channel() {
                    if !self.subscriptions.is_subscribed(agent, channel) {
                        tracing::trace!("{}: dropped {:?} (not subscribed to {:?})", agent, event, channel);
                        continue;
                    }
                }
                if self.with_agent(agent, now, |a, cx| a.handle(&event, cx)).is_some() {
                    dispatched += 1;
                }
            }
        }

        // ── Phase ⑦: removals ─────────────────────────────────────────────
        let doomed: Vec<AgentId> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(Agent::pending_removal))
            .map(|(i, _)| AgentId(i as u32))
            .collect();
        for &agent in &doomed {
            self.remove_agent(agent);
            tracing::info!("{}: removed at {}", agent, now);
        }

        (dispatched, doomed)
    }

    /// Sensing position of every controlled agent, indexed by `AgentId`.
    fn observers(&self) -> Vec<Option<Observer>> {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let agent = slot.as_ref().filter(|a| a.is_controlled())?;
                let id = AgentId(i as u32);
                Some(Observer {
                    entity:   agent.entity(),
                    position: self.navigation.position(id)?,
                    heading:  self.navigation.heading(id).unwrap_or(0.0),
                })
            })
            .collect()
    }

    /// Run `f` against `agent` with a context borrowing every service, then
    /// record any state change and revoke a detached controller's
    /// subscriptions and senses.
    fn with_agent<R>(
        &mut self,
        agent: AgentId,
        tick:  Tick,
        f:     impl FnOnce(&mut Agent, &mut AgentContext<'_>) -> R,
    ) -> Option<R> {
        let i = agent.index();
        let slot = self.agents.get_mut(i)?.as_mut()?;
        let rng = self.rngs.get_mut(i)?;
        let position = match self.navigation.position(agent) {
            Some(p) => p,
            None => self.world.position(slot.entity()).unwrap_or_default(),
        };

        let before = slot.state().state();
        let was_controlled = slot.is_controlled();
        let result = {
            let mut cx = AgentContext::new(
                tick,
                position,
                &mut self.timers,
                &mut self.navigation,
                &self.senses,
                &self.world,
                rng,
            );
            f(&mut *slot, &mut cx)
        };

        let after = slot.state().state();
        if before != after {
            self.transitions.push(TransitionRecord {
                tick,
                agent,
                from:   before,
                to:     after,
                health: slot.state().health(),
            });
        }
        if was_controlled && !slot.is_controlled() {
            self.revoke(agent);
            self.senses.remove(agent);
        }
        Some(result)
    }

    // ── Agent lifecycle ───────────────────────────────────────────────────

    /// Register an agent everywhere without activating its controller.
    pub(crate) fn insert_agent(&mut self, position: Point3, tuning: AgentTuning) -> SimResult<AgentId> {
        tuning.validate()?;
        let agent = AgentId(self.agents.len() as u32);
        let entity = self.world.spawn(EntityKind::Agent(agent), position);

        self.agents.push(Some(Agent::spawn(agent, entity, position, tuning)));
        self.rngs.push(AgentRng::new(self.config.seed, agent));
        self.navigation.place(agent, position);
        self.senses.register(agent);
        let tokens = ALL_CHANNELS.map(|channel| self.subscriptions.subscribe(agent, channel));
        self.tokens.push(tokens.to_vec());
        Ok(agent)
    }

    pub(crate) fn activate(&mut self, agent: AgentId) {
        let now = self.clock.current_tick;
        self.timers.advance_to(now);
        self.with_agent(agent, now, |a, cx| a.activate(cx));
    }

    fn remove_agent(&mut self, agent: AgentId) -> Option<Agent> {
        let removed = self.agents.get_mut(agent.index())?.take()?;
        self.world.despawn(removed.entity());
        self.navigation.remove(agent);
        self.senses.remove(agent);
        self.revoke(agent);
        self.timers.cancel_owner(agent);
        Some(removed)
    }

    /// Hand back every token `agent` still holds.
    fn revoke(&mut self, agent: AgentId) {
        let Some(tokens) = self.tokens.get_mut(agent.index()) else { return };
        let revoked = tokens.drain(..).filter(|&t| self.subscriptions.unsubscribe(t)).count();
        if revoked > 0 {
            tracing::debug!("{}: revoked {} subscriptions", agent, revoked);
        }
    }

    fn non_agent(&self, entity: EntityId) -> SimResult<()> {
        match self.world.get(entity).map(|r| r.kind) {
            None => Err(SimError::UnknownEntity(entity)),
            Some(EntityKind::Agent(agent)) => Err(SimError::Config(format!(
                "{entity} belongs to {agent}; agents move through navigation"
            ))),
            Some(_) => Ok(()),
        }
    }
}
