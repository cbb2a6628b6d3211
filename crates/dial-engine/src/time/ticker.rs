use std::time::{Duration, Instant};

/// Redraw scheduler for one window.
///
/// The ticker fires on its first poll and then whenever its deadline has
/// passed. The next deadline is one period after the previous one; when the
/// loop has fallen more than a period behind, the schedule re-anchors on
/// `now` instead of firing a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next_due: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true when a redraw is due at `now`, and advances the schedule.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            Some(due) => {
                let next = due + self.period;
                self.next_due = Some(if next <= now { now + self.period } else { next });
                true
            }
            None => {
                self.next_due = Some(now + self.period);
                true
            }
        }
    }

    /// Instant of the next scheduled tick; `None` until the first poll.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Forgets the schedule so the next poll fires immediately.
    ///
    /// Useful when resuming from suspension.
    pub fn reset(&mut self) {
        self.next_due = None;
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn fires_immediately_then_once_per_period() {
        let t0 = Instant::now();
        let mut t = Ticker::new(SECOND);

        assert!(t.poll(t0));
        assert_eq!(t.deadline(), Some(t0 + SECOND));
        assert!(!t.poll(t0 + Duration::from_millis(500)));
        assert!(t.poll(t0 + SECOND));
        assert_eq!(t.deadline(), Some(t0 + SECOND * 2));
    }

    #[test]
    fn late_poll_keeps_phase_when_within_one_period() {
        let t0 = Instant::now();
        let mut t = Ticker::new(SECOND);
        t.poll(t0);

        assert!(t.poll(t0 + Duration::from_millis(1200)));
        assert_eq!(t.deadline(), Some(t0 + SECOND * 2));
    }

    #[test]
    fn long_stall_reanchors_without_burst() {
        let t0 = Instant::now();
        let mut t = Ticker::new(SECOND);
        t.poll(t0);

        let late = t0 + Duration::from_secs(10);
        assert!(t.poll(late));
        assert!(!t.poll(late));
        assert_eq!(t.deadline(), Some(late + SECOND));
    }

    #[test]
    fn reset_fires_on_next_poll() {
        let t0 = Instant::now();
        let mut t = Ticker::default();
        t.poll(t0);
        t.reset();
        assert_eq!(t.deadline(), None);
        assert!(t.poll(t0 + Duration::from_millis(10)));
        assert_eq!(t.period(), SECOND);
    }
}
