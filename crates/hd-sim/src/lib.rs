//! `hd-sim`: world registry, event subscriptions and the tick loop.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                |
//! |------------------|---------------------------------------------------------|
//! | [`world`]        | `World`, `EntityRecord`, `EntityKind`, `Patrol`         |
//! | [`subscription`] | `Subscriptions`, `SubscriptionToken`: channel gating    |
//! | [`config`]       | `ScenarioConfig`, `TargetSpawn`: TOML scenarios         |
//! | [`observer`]     | `SimObserver`, `TransitionRecord`, `TickSummary`        |
//! | [`builder`]      | `SimBuilder`                                            |
//! | [`sim`]          | `Sim`: the tick loop                                    |
//! | [`error`]        | `SimError`, `SimResult<T>`                              |
//!
//! # Seven-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Navigation: patrols walk; agents step; completions collected.
//!   ② Sync      : agent positions copied into the world.
//!   ③ Perception: sight updated against an R-tree of the world
//!                  (parallel with the `parallel` feature).
//!   ④ Proximity : overlap enter/exit per agent.
//!   ⑤ Timers    : due timers drained.
//!   ⑥ Dispatch  : ascending AgentId, one event at a time:
//!                    Perception / MoveCompleted / Proximity → only while
//!                                                             subscribed
//!                    Timer                                 → always
//!   ⑦ Removals  : destroyed agents leave every service.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the perception phase on Rayon's thread pool.      |
//! | `fx-hash`  | FxHash instead of SipHash for the timer queue index.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hd_core::{Point3, SimConfig};
//! use hd_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .agent(Point3::ORIGIN)
//!     .patrolling_target(Point3::new(900.0, 0.0, 0.0), vec![Point3::ORIGIN], 120.0)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod subscription;
pub mod world;


pub use builder::SimBuilder;
pub use config::{ScenarioConfig, TargetSpawn};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary, TransitionRecord};
pub use sim::Sim;
pub use subscription::{SubscriptionToken, Subscriptions};
pub use world::{EntityKind, EntityRecord, Patrol, World};
