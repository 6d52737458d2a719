//! `hd-sense`: what agents see and what is within striking range.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`config`]    | `SightConfig`, `ProximityVolume`                              |
//! | [`index`]     | `SpatialIndex`: R-tree of entity positions                    |
//! | [`sight`]     | `SightSense`: one agent's sight memory and stimuli            |
//! | [`proximity`] | `ProximityTracker`, `ProximityEvent`: overlap enter/exit      |
//! | [`store`]     | `SensoryStore`, `Observer`: all senses; `PerceptionQuery` impl  |
//! | [`error`]     | `SenseError`, `SenseResult<T>`                                |
//!
//! # Sensing model (hysteresis)
//!
//! ```text
//!   distance ≤ sight_radius              → sensed   (Detected on entry)
//!   sight_radius < distance ≤ lose_radius → unchanged
//!   distance > lose_radius or gone       → unsensed (Lost on exit)
//!   unsensed for max_age_secs            → forgotten, silently
//! ```
//!
//! Candidates come from a [`SpatialIndex`] rebuilt once per tick, so each
//! observer only examines entities inside its lose-sight radius.

pub mod config;
pub mod error;
pub mod index;
pub mod proximity;
pub mod sight;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::{ProximityVolume, SightConfig};
pub use error::{SenseError, SenseResult};
pub use index::SpatialIndex;
pub use proximity::{ProximityEvent, ProximityTracker};
pub use sight::SightSense;
pub use store::{Observer, SensoryStore};
