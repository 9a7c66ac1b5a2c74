use std::thread;
use std::time::{Duration, Instant};

/// Default refresh rate of the overlay
pub const DEFAULT_RATE_HZ: u32 = 144;

/// Fixed-period tick scheduler.
///
/// Deadlines advance by exactly one period so rounding in `sleep` does not
/// accumulate. A tick that overruns its deadline resynchronises to the
/// current time instead of trying to catch up with a burst of short ticks.
/// Best effort only: the OS sleep granularity bounds the accuracy.
#[derive(Debug)]
pub struct FramePacer {
    period: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: Instant::now() + period,
        }
    }

    /// Pacer for `rate` ticks per second; a rate of zero is treated as one
    pub fn from_rate(rate: u32) -> Self {
        Self::new(Duration::from_secs(1) / rate.max(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the current deadline, zero if it has passed
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_deadline.saturating_duration_since(now)
    }

    /// Advance the schedule past `now` and return how long to sleep
    pub fn advance(&mut self, now: Instant) -> Duration {
        let remaining = self.remaining(now);
        if remaining.is_zero() {
            self.next_deadline = now + self.period;
        } else {
            self.next_deadline += self.period;
        }
        remaining
    }

    /// Sleep for the remainder of the current tick
    pub fn wait(&mut self) {
        let remaining = self.advance(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::from_rate(DEFAULT_RATE_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_period_is_144hz() {
        let pacer = FramePacer::default();
        assert_eq!(pacer.period(), Duration::from_nanos(6_944_444));
    }

    #[test]
    fn test_zero_rate_clamped() {
        assert_eq!(FramePacer::from_rate(0).period(), Duration::from_secs(1));
    }

    #[test]
    fn test_advance_returns_remainder() {
        let mut pacer = FramePacer::new(Duration::from_millis(10));
        let start = pacer.next_deadline - Duration::from_millis(10);

        let sleep = pacer.advance(start + Duration::from_millis(4));
        assert_eq!(sleep, Duration::from_millis(6));
        // Next deadline is one full period after the previous one
        assert_eq!(pacer.next_deadline, start + Duration::from_millis(20));
    }

    #[test]
    fn test_overrun_resynchronises() {
        let mut pacer = FramePacer::new(Duration::from_millis(10));
        let late = pacer.next_deadline + Duration::from_millis(25);

        assert_eq!(pacer.advance(late), Duration::ZERO);
        assert_eq!(pacer.next_deadline, late + Duration::from_millis(10));
    }

    #[test]
    fn test_wait_is_bounded() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        let start = Instant::now();
        pacer.wait();
        assert!(start.elapsed() < Duration::from_millis(200));
    }
}
