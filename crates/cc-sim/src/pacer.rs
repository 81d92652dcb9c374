//! Real-time pacing for the fixed-rate driver loop.

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps between ticks so the loop runs at a fixed rate.
///
/// Deadlines are scheduled from the previous deadline, not from "now", so
/// per-tick work does not stretch the period.  A loop that has fallen more
/// than one period behind restarts its schedule instead of bursting.
pub struct TickPacer {
    period:        Duration,
    next_deadline: Instant,
}

impl TickPacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: Instant::now() + period,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick boundary.  Returns how long it slept.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        if now >= self.next_deadline {
            self.next_deadline = now + self.period;
            return Duration::ZERO;
        }
        let slept = self.next_deadline - now;
        thread::sleep(slept);
        self.next_deadline += self.period;
        slept
    }
}
