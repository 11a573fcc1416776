//! Fixed-rate frame clock
//!
//! Blocks between ticks so the loop runs at the target frequency, and hands
//! out a monotonic millisecond timestamp for interval comparisons (spawn
//! timers). Under load it degrades by running late, never by failing: when a
//! deadline is already past, the clock resynchronizes to "now".

use std::time::{Duration, Instant};

use spin_sleep::SpinSleeper;

pub struct FrameClock {
    origin: Instant,
    deadline: Instant,
    period: Duration,
    sleeper: SpinSleeper,
}

impl FrameClock {
    pub fn new(hz: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(hz.max(1)));
        let now = Instant::now();
        Self {
            origin: now,
            deadline: now + period,
            period,
            sleeper: SpinSleeper::default(),
        }
    }

    /// Milliseconds since the clock was created; monotonic
    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Block until the next frame boundary and return the timestamp
    pub fn tick(&mut self) -> u64 {
        let now = Instant::now();
        if now < self.deadline {
            self.sleeper.sleep(self.deadline - now);
            self.deadline += self.period;
        } else {
            // Running behind; skip the wait and rebase the deadline
            self.deadline = now + self.period;
        }
        self.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_monotonic() {
        let mut clock = FrameClock::new(240);
        let mut last = clock.now_ms();
        for _ in 0..5 {
            let t = clock.tick();
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn ticks_are_spaced_at_least_a_period() {
        let mut clock = FrameClock::new(100);
        let start = Instant::now();
        clock.tick();
        clock.tick();
        // Two ticks from a fresh clock cannot complete faster than one period
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
