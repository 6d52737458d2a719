//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use hd_core::Tick;
use hd_sim::{SimObserver, TickSummary, TransitionRecord};

use crate::row::{TickSummaryRow, TransitionRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes transitions and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Transitions are buffered per tick and written in one batch at tick end.
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<TransitionRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!("output write failed: {}", e);
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_transition(&mut self, record: &TransitionRecord) {
        self.pending.push(TransitionRow::from(record));
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        if !self.pending.is_empty() {
            let rows = std::mem::take(&mut self.pending);
            let result = self.writer.write_transitions(&rows);
            self.store_err(result);
        }
        let result = self.writer.write_tick_summary(&TickSummaryRow::new(tick.0, summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
