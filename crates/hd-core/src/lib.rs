//! `hd-core`: foundational types for the `rust_horde` agent behavior framework.
//!
//! This crate is a dependency of every other `hd-*` crate.  It has no `hd-*`
//! dependencies and only a handful of external ones (`rand`, `serde`,
//! `thiserror`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `EntityId`, `RequestId`, `TimerHandle`     |
//! | [`geo`]    | `Point3`, ground-plane distance, box containment      |
//! | [`time`]   | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]    | `AgentRng` (per-agent, deterministic)                 |
//! | [`error`]  | `CoreError`, `CoreResult`                             |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point3;
pub use ids::{AgentId, EntityId, RequestId, TimerHandle};
pub use rng::AgentRng;
pub use time::{SimClock, SimConfig, Tick};
