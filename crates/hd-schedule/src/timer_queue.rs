//! `TimerQueue`: sparse one-shot timers keyed by due tick.
//!
//! Most ticks fire nothing, so timers are bucketed by due tick in a
//! `BTreeMap` and each tick drains only the buckets that have come due.
//! Cancellation is lazy: a canceled handle is dropped from the live index and
//! its entry is skipped when its bucket drains.

use std::collections::BTreeMap;
#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

use hd_behavior::{TimerKind, TimerService};
use hd_core::time::ticks_for_secs;
use hd_core::{AgentId, Tick, TimerHandle};

use crate::{ScheduleError, ScheduleResult};

#[cfg(feature = "fx-hash")]
type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A timer that came due.
#[derive(Clone, Debug, PartialEq)]
pub struct FiredTimer<T> {
    pub handle:  TimerHandle,
    pub owner:   AgentId,
    pub tick:    Tick,
    pub payload: T,
}

struct Entry<T> {
    handle:  TimerHandle,
    owner:   AgentId,
    payload: T,
}

pub struct TimerQueue<T> {
    tick_duration_ms: u32,
    now:              Tick,
    next_handle:      TimerHandle,
    buckets:          BTreeMap<Tick, Vec<Entry<T>>>,
    /// Live (scheduled, not fired, not canceled) handles → due tick.
    live:             HashMap<TimerHandle, (Tick, AgentId)>,
}

impl<T> TimerQueue<T> {
    pub fn new(tick_duration_ms: u32) -> ScheduleResult<Self> {
        if tick_duration_ms == 0 {
            return Err(ScheduleError::ZeroTickDuration);
        }
        Ok(Self {
            tick_duration_ms,
            now:         Tick::ZERO,
            next_handle: TimerHandle(0),
            buckets:     BTreeMap::new(),
            live:        HashMap::default(),
        })
    }

    /// The tick the queue considers current.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Schedule `payload` for `owner`, `delay_secs` of simulated time from now.
    ///
    /// Negative and non-finite delays are treated as zero.
    pub fn schedule(&mut self, delay_secs: f32, owner: AgentId, payload: T) -> TimerHandle {
        let delay_secs = if delay_secs.is_finite() { delay_secs } else { 0.0 };
        let ticks = ticks_for_secs(delay_secs, self.tick_duration_ms).max(1);
        let due = self.now + ticks;
        let handle = self.next_handle;
        self.next_handle = handle.next();

        self.buckets.entry(due).or_default().push(Entry { handle, owner, payload });
        self.live.insert(handle, (due, owner));
        handle
    }

    /// Cancel a pending timer.  Returns `false` if it already fired, was
    /// already canceled, or never existed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.live.remove(&handle).is_some()
    }

    /// Cancel every pending timer owned by `owner`; returns how many.
    pub fn cancel_owner(&mut self, owner: AgentId) -> usize {
        let before = self.live.len();
        self.live.retain(|_, (_, o)| *o != owner);
        before - self.live.len()
    }

    /// Move the current tick forward.  Never moves backwards.
    pub fn advance_to(&mut self, tick: Tick) {
        self.now = self.now.max(tick);
    }

    /// Remove and return every live timer due at or before the current tick,
    /// in due-tick order then scheduling order.
    pub fn drain_due(&mut self) -> Vec<FiredTimer<T>> {
        let later = self.buckets.split_off(&(self.now + 1));
        let due = std::mem::replace(&mut self.buckets, later);

        let mut fired = Vec::new();
        for (tick, entries) in due {
            for entry in entries {
                if self.live.remove(&entry.handle).is_some() {
                    fired.push(FiredTimer {
                        handle:  entry.handle,
                        owner:   entry.owner,
                        tick,
                        payload: entry.payload,
                    });
                }
            }
        }
        fired
    }

    /// Due tick of a live timer.
    pub fn due_tick(&self, handle: TimerHandle) -> Option<Tick> {
        self.live.get(&handle).map(|&(tick, _)| tick)
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl TimerService for TimerQueue<TimerKind> {
    fn schedule(&mut self, owner: AgentId, delay_secs: f32, kind: TimerKind) -> Option<TimerHandle> {
        let handle = TimerQueue::schedule(self, delay_secs, owner, kind);
        tracing::trace!("{}: {:?} timer {} due {:?}", owner, kind, handle, self.due_tick(handle));
        Some(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        TimerQueue::cancel(self, handle);
    }
}
