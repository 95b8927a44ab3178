//! Per-vehicle tick source.

use std::time::Duration;

use agv_core::Tick;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Evenly spaced ticks for one vehicle.
///
/// The first tick fires immediately.  A tick that is late because the
/// previous one overran (slow sink) delays the schedule rather than
/// bursting to catch up, so backpressure slows only this vehicle.
#[derive(Debug)]
pub struct VehicleClock {
    interval: Interval,
    tick:     Tick,
}

impl VehicleClock {
    /// `period` must be non-zero.
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, tick: Tick::ZERO }
    }

    /// Wait for the next tick and return its 1-based number.
    pub async fn next(&mut self) -> Tick {
        self.interval.tick().await;
        self.tick = self.tick.next();
        self.tick
    }

    /// Ticks delivered so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick.0
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}
