use std::time::{Duration, Instant};

/// Cancellable fixed-interval tick schedule driven by polling.
///
/// The schedule never fires on its own; the frame loop calls [`poll`] with
/// the current time. Once stopped nothing fires until the next `start`, so a
/// deadline armed before a pause or reset can never produce a stale tick.
///
/// [`poll`]: TickSchedule::poll
#[derive(Debug, Clone, Default)]
pub struct TickSchedule {
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    interval: Duration,
    deadline: Instant,
}

impl TickSchedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the schedule; the first tick is due one `interval` after `now`.
    ///
    /// Any previously armed deadline is discarded.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        debug_assert!(!interval.is_zero());
        self.armed = Some(Armed {
            interval,
            deadline: now + interval,
        });
    }

    /// Disarms the schedule. Calling it while stopped does nothing.
    pub fn stop(&mut self) {
        self.armed = None;
    }

    /// Same as `stop` followed by `start`.
    pub fn restart(&mut self, interval: Duration, now: Instant) {
        self.stop();
        self.start(interval, now);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// Interval of the armed schedule.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.armed.map(|armed| armed.interval)
    }

    /// Returns true when a tick is due at `now` and advances the deadline.
    ///
    /// Fires at most once per call. A driver that fell more than one interval
    /// behind is re-anchored to `now` instead of bursting through missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };

        if now < armed.deadline {
            return false;
        }

        let next = armed.deadline + armed.interval;
        armed.deadline = if next <= now {
            now + armed.interval
        } else {
            next
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickSchedule;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn fires_once_per_elapsed_interval() {
        let t0 = Instant::now();
        let mut schedule = TickSchedule::new();
        schedule.start(INTERVAL, t0);

        assert!(!schedule.poll(t0 + Duration::from_millis(99)));
        assert!(schedule.poll(t0 + Duration::from_millis(100)));
        assert!(!schedule.poll(t0 + Duration::from_millis(150)));
        assert!(schedule.poll(t0 + Duration::from_millis(205)));
    }

    #[test]
    fn late_poll_re_anchors_instead_of_bursting() {
        let t0 = Instant::now();
        let mut schedule = TickSchedule::new();
        schedule.start(INTERVAL, t0);

        let late = t0 + Duration::from_millis(1_000);
        assert!(schedule.poll(late));
        assert!(!schedule.poll(late));
        assert!(!schedule.poll(late + Duration::from_millis(99)));
        assert!(schedule.poll(late + INTERVAL));
    }

    #[test]
    fn stopped_schedule_never_fires() {
        let t0 = Instant::now();
        let mut schedule = TickSchedule::new();
        schedule.start(INTERVAL, t0);
        schedule.stop();

        assert!(!schedule.is_running());
        assert!(!schedule.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut schedule = TickSchedule::new();
        schedule.start(INTERVAL, Instant::now());
        schedule.stop();

        schedule.stop();
        schedule.stop();

        assert!(!schedule.is_running());
        assert_eq!(schedule.interval(), None);
        assert!(!schedule.poll(Instant::now() + Duration::from_secs(1)));
    }

    #[test]
    fn restart_discards_the_old_deadline() {
        let t0 = Instant::now();
        let mut schedule = TickSchedule::new();
        schedule.start(Duration::from_millis(160), t0);

        let change = t0 + Duration::from_millis(150);
        schedule.restart(Duration::from_millis(60), change);

        assert_eq!(schedule.interval(), Some(Duration::from_millis(60)));
        assert!(!schedule.poll(t0 + Duration::from_millis(160)));
        assert!(schedule.poll(change + Duration::from_millis(60)));
    }
}
