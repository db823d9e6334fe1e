//! Simulation step counter.
//!
//! Unlike the teacher framework's `Tick`, a `Step` has no wall-clock mapping:
//! this simulation has no notion of simulated real time, only a discrete
//! step sequence. Kept as its own newtype (rather than a bare `u64`) so
//! delayed-delivery arithmetic in `gr-bus` and backoff arithmetic in
//! `gr-agent` read unambiguously as step counts rather than arbitrary
//! integers.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }

    /// Steps elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Step) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}", self.0)
    }
}
