//! `hd-behavior`: the agent behavior state machine and its service contracts.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`state`]      | `BehaviorState`, `AgentState`, `DamageOutcome`                |
//! | [`tuning`]     | `AgentTuning`: immutable per-agent tunables                   |
//! | [`event`]      | `AgentEvent`, `Stimulus`, `MoveOutcome`, `TimerKind`, `Channel` |
//! | [`services`]   | `TimerService`, `NavigationService`, `PerceptionQuery`, `EntityDirectory` |
//! | [`noop`]       | `NoTimers`, `NoNavigation`, `NoPerception`: absent services   |
//! | [`context`]    | `AgentContext<'a>`: services handed to every reaction         |
//! | [`controller`] | `BehaviorController`: the reaction handlers                   |
//! | [`agent`]      | `Agent`, `Removal`: owns state, controller, death and removal  |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Reaction model
//!
//! Perception updates, movement completions, timer firings and proximity
//! overlaps are delivered to [`Agent::handle`] one at a time per agent.  No
//! handler blocks: every wait is a timer or navigation request whose
//! completion arrives as a later event.  Services are passed in per call via
//! [`AgentContext`], so tests drive the controller with fakes.
//!
//! Reactions never fail.  Stale callbacks, non-pursuable entities, events
//! after death and unavailable services are all silent no-ops; `state` and
//! `health` stay authoritative throughout.

pub mod agent;
pub mod context;
pub mod controller;
pub mod error;
pub mod event;
pub mod noop;
pub mod services;
pub mod state;
pub mod tuning;


pub use agent::{Agent, Removal};
pub use context::AgentContext;
pub use controller::BehaviorController;
pub use error::{BehaviorError, BehaviorResult};
pub use event::{AgentEvent, Channel, MoveOutcome, SenseKind, Stimulus, StimulusKind, TimerKind};
pub use noop::{NoNavigation, NoPerception, NoTimers};
pub use services::{EntityDirectory, NavigationService, PerceptionQuery, TimerService};
pub use state::{AgentState, BehaviorState, DamageOutcome};
pub use tuning::AgentTuning;
