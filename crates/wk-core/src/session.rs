//! In-memory accumulation of active seconds for the current process.
//!
//! The session is never persisted. It is advanced only by ticks, and each
//! tick that lands while the [`ActivityClock`] reports activity adds exactly
//! one second. Missed or delayed ticks are not compensated, so the total is
//! only as accurate as the tick schedule driving it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{ActivityClock, DEFAULT_IDLE_THRESHOLD};
use crate::types::{FileId, LanguageId};

/// Read-only view of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// When the session started (engine construction or last reset).
    pub start_time: DateTime<Utc>,
    /// Active seconds counted since `start_time`.
    pub total_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_file: Option<FileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_language: Option<LanguageId>,
}

/// Running count of active seconds, gated by an [`ActivityClock`].
#[derive(Debug, Clone)]
pub struct SessionAccumulator {
    start_time: DateTime<Utc>,
    seconds: u64,
    current_file: Option<FileId>,
    current_language: Option<LanguageId>,
    clock: ActivityClock,
    idle_threshold: Duration,
}

impl SessionAccumulator {
    /// Starts a session at `now` with the default idle threshold.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_idle_threshold(now, DEFAULT_IDLE_THRESHOLD)
    }

    pub fn with_idle_threshold(now: DateTime<Utc>, idle_threshold: Duration) -> Self {
        Self {
            start_time: now,
            seconds: 0,
            current_file: None,
            current_language: None,
            clock: ActivityClock::new(now),
            idle_threshold,
        }
    }

    /// Notes an activity event: refreshes the clock and the current document.
    pub fn observe(&mut self, now: DateTime<Utc>, file: &FileId, language: &LanguageId) {
        self.clock.touch(now);
        self.current_file = Some(file.clone());
        self.current_language = Some(language.clone());
    }

    /// Advances the session by one tick.
    ///
    /// Returns whether the tick was counted as active.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let active = self.clock.is_active(now, self.idle_threshold);
        if active {
            self.seconds = self.seconds.saturating_add(1);
        }
        active
    }

    /// Zeroes the counter and restarts the session at `now`.
    ///
    /// The activity clock and current document are left as they are.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        tracing::debug!(discarded = self.seconds, "resetting session");
        self.seconds = 0;
        self.start_time = now;
    }

    pub fn snapshot(&self) -> SessionStats {
        SessionStats {
            start_time: self.start_time,
            total_time: self.seconds,
            current_file: self.current_file.clone(),
            current_language: self.current_language.clone(),
        }
    }

    pub const fn clock(&self) -> &ActivityClock {
        &self.clock
    }

    pub const fn idle_threshold(&self) -> Duration {
        self.idle_threshold
    }
}
