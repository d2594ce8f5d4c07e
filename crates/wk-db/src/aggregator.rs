//! Per-day aggregation of activity events.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use wk_core::{Activity, DailyStats, StoreData, day_key};

use crate::{Database, StatsStore, StorageError};

/// Owns the statistics store and applies activity events to it.
///
/// Every operation loads the full document, and mutations write the full
/// document back before returning. Nothing is cached in between, so a
/// failed save leaves no trace of the event.
pub struct DailyAggregator<S = Database> {
    store: Mutex<S>,
}

impl<S: StatsStore> DailyAggregator<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the document, starting from empty if it is absent or unreadable.
    fn load(store: &S) -> StoreData {
        match store.load() {
            Ok(Some(data)) => data,
            Ok(None) => StoreData::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load statistics, starting empty");
                StoreData::default()
            }
        }
    }

    /// Records one unit of activity against the day containing `now`.
    ///
    /// Returns the day's updated record once it has been persisted.
    pub fn record_event(
        &self,
        now: DateTime<Utc>,
        activity: &Activity,
    ) -> Result<DailyStats, StorageError> {
        let mut store = self.lock();
        let mut data = Self::load(&store);
        let stats = data.record(now, activity).clone();
        store.save(&data)?;
        tracing::debug!(
            date = %stats.date,
            file = %activity.file,
            language = %activity.language,
            total = stats.total_time,
            "recorded activity"
        );
        Ok(stats)
    }

    /// Returns the record for the day containing `now`, if any activity has
    /// been recorded on it.
    pub fn get_today(&self, now: DateTime<Utc>) -> Option<DailyStats> {
        let store = self.lock();
        let mut data = Self::load(&store);
        data.daily_stats.remove(&day_key(now))
    }

    /// Returns every recorded day, keyed by date.
    pub fn get_all(&self) -> BTreeMap<String, DailyStats> {
        let store = self.lock();
        Self::load(&store).daily_stats
    }

    /// Replaces the store with an empty document.
    ///
    /// This discards all history, including the activity log.
    pub fn reset(&self) -> Result<(), StorageError> {
        let mut store = self.lock();
        store.save(&StoreData::default())?;
        tracing::info!("statistics reset");
        Ok(())
    }

    /// Consumes the aggregator and returns its store.
    pub fn into_inner(self) -> S {
        self.store.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
