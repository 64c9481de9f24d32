//! Tick scheduling against host-supplied clocks.
//!
//! The core never reads a system clock itself: native hosts feed in
//! milliseconds derived from `std::time::Instant`, browser hosts feed in
//! `Date.now()`. That keeps the crate free of platform timing code and
//! the schedule fully testable.

/// Default tick period: one simulated year per wall-clock second.
pub const DEFAULT_TICK_PERIOD_MS: f64 = 1000.0;

/// A cancellable periodic schedule driven by polling.
///
/// Arm it with the current time, then poll it with later timestamps;
/// each poll at or past the deadline reports one due tick and re-bases
/// the deadline from the poll time. A poll arriving late therefore
/// yields a single tick, not a burst of catch-up ticks.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    period_ms: f64,
    deadline_ms: Option<f64>,
}

impl TickClock {
    /// Create a disarmed clock. Non-finite or non-positive periods fall
    /// back to [`DEFAULT_TICK_PERIOD_MS`].
    pub fn new(period_ms: f64) -> Self {
        let period_ms = if period_ms.is_finite() && period_ms > 0.0 {
            period_ms
        } else {
            DEFAULT_TICK_PERIOD_MS
        };
        Self {
            period_ms,
            deadline_ms: None,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Change the period. Takes effect from the next deadline re-base;
    /// an already armed deadline is left where it is.
    pub fn set_period_ms(&mut self, period_ms: f64) {
        if period_ms.is_finite() && period_ms > 0.0 {
            self.period_ms = period_ms;
        }
    }

    pub fn armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Start the schedule: the first tick is due one period after `now_ms`.
    pub fn arm(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + self.period_ms);
    }

    /// Stop the schedule. Pending deadlines are forgotten.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Report whether a tick is due at `now_ms`. Returns true at most
    /// once per period and re-bases the next deadline from `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = Some(now_ms + self.period_ms);
                true
            }
            _ => false,
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_clock_never_fires() {
        let mut clock = TickClock::default();
        assert!(!clock.armed());
        assert!(!clock.poll(10_000.0));
    }

    #[test]
    fn fires_once_per_period() {
        let mut clock = TickClock::new(1000.0);
        clock.arm(0.0);

        assert!(!clock.poll(500.0));
        assert!(clock.poll(1000.0), "deadline reached");
        assert!(!clock.poll(1400.0), "next deadline re-based to 2000");
        assert!(clock.poll(2100.0));
    }

    /// A host that stalls for several periods gets one tick on resume,
    /// not a backlog replay.
    #[test]
    fn late_poll_yields_a_single_tick() {
        let mut clock = TickClock::new(1000.0);
        clock.arm(0.0);

        assert!(clock.poll(5500.0));
        assert!(!clock.poll(5600.0));
        assert!(clock.poll(6500.0), "deadline re-based from the late poll");
    }

    #[test]
    fn cancel_forgets_the_deadline() {
        let mut clock = TickClock::new(1000.0);
        clock.arm(0.0);
        clock.cancel();
        assert!(!clock.armed());
        assert!(!clock.poll(10_000.0));

        clock.arm(10_000.0);
        assert!(!clock.poll(10_500.0));
        assert!(clock.poll(11_000.0));
    }

    #[test]
    fn invalid_period_falls_back_to_default() {
        assert_eq!(TickClock::new(0.0).period_ms(), DEFAULT_TICK_PERIOD_MS);
        assert_eq!(TickClock::new(-5.0).period_ms(), DEFAULT_TICK_PERIOD_MS);
        assert_eq!(TickClock::new(f64::NAN).period_ms(), DEFAULT_TICK_PERIOD_MS);

        let mut clock = TickClock::new(250.0);
        clock.set_period_ms(f64::INFINITY);
        assert_eq!(clock.period_ms(), 250.0, "invalid update ignored");
    }
}
