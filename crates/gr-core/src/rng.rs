//! Simulation-level RNG.
//!
//! The teacher framework also keeps a per-agent `AgentRng` for independent,
//! order-insensitive agent randomness. This simulation has no use for one:
//! agent decision-making is a deterministic function of observed state and
//! message history (see `gr-agent`), so the only randomness in the whole
//! system is at board construction time (initial gold scatter, initial robot
//! placement) — a single global stream is sufficient and keeps a run
//! reproducible end to end from one seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
