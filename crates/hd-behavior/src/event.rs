//! Events delivered to an agent.

use hd_core::{EntityId, Point3, RequestId, TimerHandle};

/// Which sense produced a stimulus.  Sight is the only configured sense.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SenseKind {
    #[default]
    Sight,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StimulusKind {
    /// The entity came within sight range.
    Detected,
    /// The entity left lose-sight range.
    Lost,
}

/// Perception data attached to a perception update.
///
/// The controller never trusts `kind` alone: the authoritative answer is the
/// agent's currently-perceived set at dispatch time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stimulus {
    pub kind:     StimulusKind,
    pub sense:    SenseKind,
    /// Where the entity was when the stimulus was produced.
    pub location: Point3,
}

impl Stimulus {
    pub fn sight(kind: StimulusKind, location: Point3) -> Self {
        Self { kind, sense: SenseKind::Sight, location }
    }
}

/// Terminal status of a movement request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Succeeded,
    /// Goal unreachable or vanished.
    Failed,
    /// Superseded by a newer request or stopped.
    Aborted,
}

/// What a timer was scheduled for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// End of the pause between roam legs.
    RoamResume,
    /// End of the idle pause after losing a target.
    PostChase,
    /// End of the dying animation.
    DeathAnimation,
    /// Corpse removal.
    Destroy,
}

/// Subscription channel an event travels on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Perception,
    Navigation,
    Proximity,
}

/// A single input to [`Agent::handle`](crate::Agent::handle).
#[derive(Clone, Debug, PartialEq)]
pub enum AgentEvent {
    Perception {
        entity:   EntityId,
        stimulus: Stimulus,
    },
    MoveCompleted {
        request: RequestId,
        outcome: MoveOutcome,
    },
    Timer {
        handle: TimerHandle,
        kind:   TimerKind,
    },
    ProximityEnter(EntityId),
    ProximityExit(EntityId),
    Damage(f32),
}

impl AgentEvent {
    /// The subscription channel gating this event, or `None` for events that
    /// always reach the agent (timers and damage).
    pub fn channel(&self) -> Option<Channel> {
        match self {
            AgentEvent::Perception { .. } => Some(Channel::Perception),
            AgentEvent::MoveCompleted { .. } => Some(Channel::Navigation),
            AgentEvent::ProximityEnter(_) | AgentEvent::ProximityExit(_) => Some(Channel::Proximity),
            AgentEvent::Timer { .. } | AgentEvent::Damage(_) => None,
        }
    }
}
