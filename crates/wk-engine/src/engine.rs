//! The accounting engine.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use wk_core::{
    Activity, DailyStats, FileId, LanguageId, SessionAccumulator, SessionStats, format_duration,
};
use wk_db::{DailyAggregator, Database, StatsStore};

use crate::{EngineError, EngineSettings, Ticker};

/// Tracks active time for one process.
///
/// Activity events update the session's activity clock and the persisted
/// daily statistics. Separately, a background ticker adds one second to the
/// session for every tick that lands while the user is active. The two
/// totals are counted differently and are not expected to agree.
///
/// Construct exactly one per process and pass it to whatever needs it.
pub struct Engine<S: StatsStore = Database> {
    session: Arc<Mutex<SessionAccumulator>>,
    daily: DailyAggregator<S>,
    ticker: Mutex<Option<Ticker>>,
    settings: EngineSettings,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: StatsStore> Engine<S> {
    /// Creates an engine with default settings. The session starts at `now`.
    pub fn new(store: S, now: DateTime<Utc>) -> Self {
        Self::with_settings(store, now, EngineSettings::default())
    }

    pub fn with_settings(store: S, now: DateTime<Utc>, settings: EngineSettings) -> Self {
        Self {
            session: Arc::new(Mutex::new(SessionAccumulator::with_idle_threshold(
                now,
                settings.idle_threshold,
            ))),
            daily: DailyAggregator::new(store),
            ticker: Mutex::new(None),
            settings,
        }
    }

    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Records activity on `file` in `language` at `now`.
    pub fn record_activity(
        &self,
        now: DateTime<Utc>,
        file: &FileId,
        language: &LanguageId,
    ) -> Result<DailyStats, EngineError> {
        self.record(now, &Activity::new(file.clone(), language.clone()))
    }

    /// Records an activity event, including its project if it has one.
    ///
    /// The session sees the event even if persisting it fails.
    pub fn record(
        &self,
        now: DateTime<Utc>,
        activity: &Activity,
    ) -> Result<DailyStats, EngineError> {
        lock(&self.session).observe(now, &activity.file, &activity.language);
        Ok(self.daily.record_event(now, activity)?)
    }

    /// Advances the session by one tick at `now`.
    ///
    /// The background ticker calls this with the wall clock; it is public so
    /// hosts with their own scheduler can drive the session directly.
    pub fn tick(&self, now: DateTime<Utc>) -> bool {
        lock(&self.session).tick(now)
    }

    pub fn session_stats(&self) -> SessionStats {
        lock(&self.session).snapshot()
    }

    pub fn today_stats(&self, now: DateTime<Utc>) -> Option<DailyStats> {
        self.daily.get_today(now)
    }

    pub fn all_stats(&self) -> BTreeMap<String, DailyStats> {
        self.daily.get_all()
    }

    /// Clears persisted history and restarts the session at `now`.
    ///
    /// The session is only reset once the empty store has been persisted, so
    /// a failed reset leaves both untouched.
    pub fn reset_stats(&self, now: DateTime<Utc>) -> Result<(), EngineError> {
        self.daily.reset()?;
        lock(&self.session).reset(now);
        Ok(())
    }

    #[expect(
        clippy::unused_self,
        reason = "exposed on the engine so collaborators need a single handle"
    )]
    pub fn format_duration(&self, seconds: u64) -> String {
        format_duration(seconds)
    }

    /// Starts the background ticker. Does nothing if it is already running.
    pub fn start(&self) -> Result<(), EngineError> {
        let mut ticker = lock(&self.ticker);
        if ticker.is_some() {
            return Ok(());
        }
        let session = Arc::clone(&self.session);
        *ticker = Some(Ticker::spawn(self.settings.tick_interval, move || {
            let counted = lock(&session).tick(Utc::now());
            tracing::trace!(counted, "session tick");
        })?);
        Ok(())
    }

    /// Stops the background ticker. Safe to call when it never started, and
    /// more than once.
    pub fn stop(&self) {
        let ticker = lock(&self.ticker).take();
        if let Some(ticker) = ticker {
            ticker.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.ticker).is_some()
    }
}

impl<S: StatsStore> Drop for Engine<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
