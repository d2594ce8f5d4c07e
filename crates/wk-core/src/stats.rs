//! Persisted statistics schema.
//!
//! The store is a single JSON document:
//!
//! ```json
//! {
//!   "activities": [],
//!   "dailyStats": {
//!     "2025-01-29": {
//!       "date": "2025-01-29",
//!       "totalTime": 2,
//!       "languages": { "typescript": 2 },
//!       "files": { "/src/a.ts": 2 },
//!       "projects": {}
//!     }
//!   }
//! }
//! ```
//!
//! Every field has a default, so documents written by older versions (or
//! with fields missing) load as empty rather than failing. Unknown fields
//! are ignored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Activity;

/// Returns the key of the calendar day containing `timestamp`.
///
/// Days are UTC calendar dates formatted as `YYYY-MM-DD`, so the key does
/// not depend on the machine's locale or timezone.
pub fn day_key(timestamp: DateTime<Utc>) -> String {
    timestamp.date_naive().format("%Y-%m-%d").to_string()
}

/// Activity totals for one calendar day, in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub total_time: u64,
    pub languages: BTreeMap<String, u64>,
    pub files: BTreeMap<String, u64>,
    pub projects: BTreeMap<String, u64>,
}

impl DailyStats {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// Applies one unit of observed activity.
    ///
    /// Increments the total and the matching language and file buckets by one
    /// each, plus the project bucket when the activity names a project.
    pub fn apply(&mut self, activity: &Activity) {
        self.total_time = self.total_time.saturating_add(1);
        bump(&mut self.languages, activity.language.as_str());
        bump(&mut self.files, activity.file.as_str());
        if let Some(project) = &activity.project {
            bump(&mut self.projects, project.as_str());
        }
    }

    /// Returns buckets ordered by descending seconds, ties broken by label.
    pub fn ranked(buckets: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = buckets
            .iter()
            .map(|(label, seconds)| (label.as_str(), *seconds))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

fn bump(buckets: &mut BTreeMap<String, u64>, label: &str) {
    let seconds = buckets.entry(label.to_string()).or_insert(0);
    *seconds = seconds.saturating_add(1);
}

/// A raw activity record.
///
/// Reserved for a future activity log. Records are carried through load and
/// save untouched but never read for statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub duration: u64,
    pub file: String,
    pub language: String,
    pub project: String,
    pub is_write: bool,
}

/// The complete persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreData {
    pub activities: Vec<ActivityRecord>,
    pub daily_stats: BTreeMap<String, DailyStats>,
}

impl StoreData {
    /// Decodes a stored document, filling in any missing `date` fields from
    /// their map keys.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut data: Self = serde_json::from_str(json)?;
        for (key, stats) in &mut data.daily_stats {
            if stats.date.is_empty() {
                stats.date.clone_from(key);
            }
        }
        Ok(data)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Applies one activity to the record for `now`'s day, creating it if
    /// needed, and returns the updated record.
    pub fn record(&mut self, now: DateTime<Utc>, activity: &Activity) -> &DailyStats {
        let key = day_key(now);
        let stats = self
            .daily_stats
            .entry(key)
            .or_insert_with_key(|key| DailyStats::new(key.clone()));
        stats.apply(activity);
        stats
    }

    pub fn day(&self, now: DateTime<Utc>) -> Option<&DailyStats> {
        self.daily_stats.get(&day_key(now))
    }
}
