//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `AgentId` and `EntityId` index
//! dense `Vec`s; `RequestId` and `TimerHandle` are monotonically increasing
//! generation counters, so a stale value never aliases a live one.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The ID following `self`.  Used by generation counters.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0.wrapping_add(1))
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a behavior-driven agent.  Dense: `agents[id.index()]`.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of any entity registered in the world (agents, targets, props).
    pub struct EntityId(u32);
}

typed_id! {
    /// Generation of a navigation request.  Every new request gets a fresh id,
    /// so a completion for a superseded request is recognisably stale.
    pub struct RequestId(u64);
}

typed_id! {
    /// Handle to a scheduled one-shot timer.
    pub struct TimerHandle(u64);
}
