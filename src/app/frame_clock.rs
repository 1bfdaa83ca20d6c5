//! Fixed-timestep pacing for the event loop.

use std::time::{Duration, Instant};

/// Schedules simulation ticks at a fixed period.
///
/// The event loop sleeps until [`FrameClock::next_tick`], runs one tick when
/// [`FrameClock::is_due`] and then calls [`FrameClock::advance`]. Small delays are
/// absorbed so the average rate stays at one tick per period; after a stall longer
/// than a whole period the schedule restarts from the current time instead of
/// running a burst of catch-up ticks.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    period: Duration,
    next_tick: Instant,
}

impl FrameClock {
    /// A clock whose first tick is due at `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_tick: now,
        }
    }

    /// When the next tick should run.
    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// Whether a tick should run at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// Records that a tick ran at `now` and schedules the next one.
    pub fn advance(&mut self, now: Instant) {
        self.next_tick += self.period;
        if self.next_tick <= now {
            log::debug!("frame clock fell behind, resynchronising");
            self.next_tick = now + self.period;
        }
    }
}
