//! Simulation time.
//!
//! Each vehicle counts its own ticks; there is no global clock.  The wall
//! duration of a tick is the configured tick period, and tick boundaries are
//! produced by the fleet driver's per-vehicle interval.

use std::fmt;

/// A per-vehicle tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
