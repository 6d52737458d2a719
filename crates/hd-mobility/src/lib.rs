//! `hd-mobility`: agent movement state, navigation requests, and completions.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`state`]   | `MoveGoal`, `ActiveRequest`, `MovementState`: per-agent travel state  |
//! | [`store`]   | `MobilityStore`: `Vec<Option<MovementState>>` indexed by `AgentId`  |
//! | [`engine`]  | `NavigationEngine`: request handling + per-tick advancement       |
//! | [`config`]  | `NavConfig`, `NavBounds`                                          |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model (straight-line stepping)
//!
//! 1. `NavigationEngine::request_move` records the goal and speed and hands
//!    back a fresh [`RequestId`][hd_core::RequestId].  A live request for the
//!    same agent is superseded and completes `Aborted`.
//! 2. Each tick `NavigationEngine::advance(dt, resolve)` steps every moving
//!    agent toward its goal by `speed * dt`.
//! 3. Point goals complete `Succeeded` once inside `acceptance_radius`.
//!    Entity goals keep following, holding at `follow_distance`, until they
//!    are superseded or stopped, or the entity stops resolving (`Failed`).
//! 4. Completions queued since the previous advance are returned with the
//!    ones produced by the step, in the order they happened.

pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::{NavBounds, NavConfig};
pub use engine::{Completion, NavigationEngine};
pub use error::{MobilityError, MobilityResult};
pub use state::{ActiveRequest, MoveGoal, MovementState};
pub use store::MobilityStore;
