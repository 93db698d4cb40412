//! Tagged deadlines on top of the host's anonymous timers.
//!
//! Zellij reports every expired `set_timeout` as a bare `Timer(elapsed)`
//! event, with nothing to say which timer it was. [`TimerQueue`] keeps the
//! purpose of each armed timer next to its deadline; on every wake-up the
//! handler drains whatever is due and dispatches on [`TimerKind`].
//!
//! Deadlines are `chrono::DateTime<Utc>` and every method takes `now`
//! explicitly, so the queue is fully deterministic under test.

use crate::search::RequestToken;
use chrono::{DateTime, Duration, Utc};

/// Host timers may fire a little early; entries this close to `now` count as due.
const DUE_SLACK_MS: i64 = 20;

/// What an armed timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Quiet period after a query change.
    Debounce {
        /// Query revision the timer was armed for.
        revision: u64,
    },
    /// Deadline for an in-flight search request.
    RequestTimeout {
        /// Request the deadline applies to.
        token: RequestToken,
    },
    /// Hides a notification.
    NotificationExpiry {
        /// Notification the timer was armed for.
        id: u64,
    },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: DateTime<Utc>,
    seq: u64,
    kind: TimerKind,
}

/// Pending deadlines, each tagged with a [`TimerKind`].
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl TimerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Arms `kind` to fire `delay` after `now`.
    ///
    /// # Returns
    ///
    /// The delay in seconds, ready to hand to the host's `set_timeout`.
    pub fn schedule(&mut self, now: DateTime<Utc>, delay: Duration, kind: TimerKind) -> f64 {
        let delay = delay.max(Duration::zero());
        self.entries.push(Entry {
            deadline: now + delay,
            seq: self.next_seq,
            kind,
        });
        self.next_seq += 1;
        tracing::trace!(kind = ?kind, delay_ms = delay.num_milliseconds(), "timer scheduled");
        to_seconds(delay)
    }

    /// Removes and returns every entry due at `now`, earliest first.
    ///
    /// Entries with equal deadlines come out in the order they were scheduled.
    pub fn drain_due(&mut self, now: DateTime<Utc>) -> Vec<TimerKind> {
        let horizon = now + Duration::milliseconds(DUE_SLACK_MS);
        let (mut due, pending): (Vec<Entry>, Vec<Entry>) =
            self.entries.drain(..).partition(|entry| entry.deadline <= horizon);
        self.entries = pending;

        due.sort_by_key(|entry| (entry.deadline, entry.seq));
        due.into_iter().map(|entry| entry.kind).collect()
    }

    /// Seconds from `now` until the earliest pending deadline, if any.
    #[must_use]
    pub fn seconds_until_next(&self, now: DateTime<Utc>) -> Option<f64> {
        self.entries
            .iter()
            .map(|entry| entry.deadline)
            .min()
            .map(|deadline| to_seconds((deadline - now).max(Duration::zero())))
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_seconds(delay: Duration) -> f64 {
    delay.num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms).unwrap()
    }

    #[test]
    fn schedule_reports_delay_in_seconds() {
        let mut timers = TimerQueue::new();
        let secs = timers.schedule(at(0), Duration::milliseconds(300), TimerKind::Debounce { revision: 1 });
        assert!((secs - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn nothing_is_due_before_its_deadline() {
        let mut timers = TimerQueue::new();
        timers.schedule(at(0), Duration::milliseconds(300), TimerKind::Debounce { revision: 1 });
        assert!(timers.drain_due(at(200)).is_empty());
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn slightly_early_wakeup_still_fires() {
        let mut timers = TimerQueue::new();
        timers.schedule(at(0), Duration::milliseconds(300), TimerKind::Debounce { revision: 1 });
        assert_eq!(timers.drain_due(at(290)), vec![TimerKind::Debounce { revision: 1 }]);
    }

    #[test]
    fn due_entries_drain_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(at(0), Duration::seconds(3), TimerKind::NotificationExpiry { id: 7 });
        timers.schedule(at(0), Duration::milliseconds(300), TimerKind::Debounce { revision: 1 });
        timers.schedule(at(100), Duration::milliseconds(300), TimerKind::Debounce { revision: 2 });
        timers.schedule(at(0), Duration::seconds(10), TimerKind::RequestTimeout { token: RequestToken(1) });

        let due = timers.drain_due(at(5_000));
        assert_eq!(
            due,
            vec![
                TimerKind::Debounce { revision: 1 },
                TimerKind::Debounce { revision: 2 },
                TimerKind::NotificationExpiry { id: 7 },
            ]
        );
        assert_eq!(timers.len(), 1);
        let remaining = timers.seconds_until_next(at(5_000)).unwrap();
        assert!((remaining - 5.0).abs() < f64::EPSILON);
    }
}
