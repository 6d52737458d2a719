//! Deterministic per-agent RNG.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! Spawning extra agents never disturbs the roam destinations of existing
//! ones, so scenario runs stay reproducible as populations grow.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Point3};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-agent deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform `f32` in the closed interval `[low, high]`.
    ///
    /// Degenerate or inverted intervals collapse to `low`, so a zero roam
    /// radius yields the home point itself.
    #[inline]
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        if !(high > low) {
            return low;
        }
        self.0.gen_range(low..=high)
    }

    /// Uniform point inside the axis-aligned box spanned by `min` and `max`.
    ///
    /// Each axis is sampled independently; an axis whose extent is zero
    /// returns `min` on that axis.
    pub fn point_in_box(&mut self, min: Point3, max: Point3) -> Point3 {
        Point3::new(
            self.range_f32(min.x, max.x),
            self.range_f32(min.y, max.y),
            self.range_f32(min.z, max.z),
        )
    }
}
