//! Idle detection based on the time of the most recent activity.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Gap after the last activity event beyond which the user counts as idle.
pub const DEFAULT_IDLE_THRESHOLD: Duration = Duration::from_secs(120);

/// Tracks when activity was last observed.
///
/// The clock starts out active: until the first [`touch`](Self::touch), the
/// construction time stands in for the last activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityClock {
    last_activity_ms: i64,
}

impl ActivityClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_activity_ms: now.timestamp_millis(),
        }
    }

    /// Records `now` as the most recent activity.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity_ms = now.timestamp_millis();
    }

    /// Returns the timestamp of the most recent activity.
    pub fn last_activity(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_activity_ms).unwrap_or_default()
    }

    /// Milliseconds elapsed between the last activity and `now`.
    ///
    /// Negative when `now` precedes the last activity (clock skew).
    pub fn idle_for_ms(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp_millis() - self.last_activity_ms
    }

    /// Returns true iff less than `idle_threshold` has passed since the last
    /// activity. The boundary itself counts as idle.
    pub fn is_active(&self, now: DateTime<Utc>, idle_threshold: Duration) -> bool {
        let threshold_ms = i64::try_from(idle_threshold.as_millis()).unwrap_or(i64::MAX);
        self.idle_for_ms(now) < threshold_ms
    }
}
