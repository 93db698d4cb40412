//! Toast notifications with an expiry deadline.

use crate::domain::Notice;
use chrono::{DateTime, Utc};

/// A notice on screen until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Matches the `NotificationExpiry` timer armed for this toast.
    pub id: u64,
    /// What to show.
    pub notice: Notice,
    /// When the toast disappears.
    pub expires_at: DateTime<Utc>,
}

/// At most one visible toast; a new one replaces the old.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    current: Option<Toast>,
    next_id: u64,
}

impl Notifications {
    /// The visible toast, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Shows `notice` until `expires_at`, replacing any visible toast.
    ///
    /// # Returns
    ///
    /// The id to tag the expiry timer with.
    pub fn show(&mut self, notice: Notice, expires_at: DateTime<Utc>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!(id, message = %notice.message, error = notice.is_error(), "showing notification");
        self.current = Some(Toast { id, notice, expires_at });
        id
    }

    /// Hides toast `id` if it is still the visible one.
    ///
    /// Returns whether anything was hidden; expiries of replaced toasts are ignored.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|toast| toast.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_toast_survives_expiry_of_older() {
        let now = Utc::now();
        let mut toasts = Notifications::default();
        let first = toasts.show(Notice::success("Book added Successfully!"), now);
        let second = toasts.show(Notice::success("Book removed"), now);

        assert!(!toasts.expire(first));
        assert_eq!(toasts.current().map(|t| t.notice.message.as_str()), Some("Book removed"));
        assert!(toasts.expire(second));
        assert!(toasts.current().is_none());
    }
}
