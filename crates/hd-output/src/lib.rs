//! `hd-output`: simulation output writers for the rust_horde framework.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `transitions.csv`, `tick_summaries.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `hd_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hd_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, TransitionRow};
pub use writer::OutputWriter;
