//! `hd-schedule`: the timer service.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`timer_queue`] | `TimerQueue<T>` (`BTreeMap<Tick, Vec<Entry>>`), `FiredTimer<T>` |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Timing model (summary)
//!
//! Delays are converted to whole ticks through integer milliseconds:
//!
//! ```text
//! ticks = ceil(round(delay_secs * 1000) / tick_duration_ms)
//! due   = now + max(ticks, 1)
//! ```
//!
//! so `2.0 s` at `100 ms/tick` is exactly 20 ticks, and a zero delay fires on
//! the next tick rather than inside the tick that scheduled it.
//!
//! `TimerQueue<TimerKind>` implements [`hd_behavior::TimerService`], which is
//! how agents and their controllers reach it.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the live-handle index.    |

pub mod error;
pub mod timer_queue;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use timer_queue::{FiredTimer, TimerQueue};
