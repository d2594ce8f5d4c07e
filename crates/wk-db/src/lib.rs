//! Storage layer for the activity time tracker.
//!
//! Persists the statistics document using `rusqlite` and provides the
//! [`DailyAggregator`], the only component that reads or writes it.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The aggregator keeps its store behind a `Mutex`, held for the whole
//! load-modify-save cycle of each operation.
//!
//! # Schema
//!
//! The statistics document is stored as JSON text in a key/value `state`
//! table under the key [`STATS_KEY`]. It is always read and written as a
//! whole; see [`wk_core::stats`] for the document layout.
//!
//! When evolving the document:
//! - Adding fields: Old code ignores unknown fields, new code defaults missing ones
//! - Removing fields: Harmless for readers, the value is dropped on next save
//! - Renaming fields: Loses the old value (requires migration)

mod aggregator;

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use wk_core::StoreData;

pub use aggregator::DailyAggregator;

/// Key under which the statistics document is stored.
pub const STATS_KEY: &str = "timeTrackingData";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The stored document could not be decoded, or the document could not be encoded.
    #[error("invalid statistics document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable home of the statistics document.
///
/// Implementations load and save the whole document at once; there is no
/// partial access.
pub trait StatsStore: Send {
    /// Loads the document, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<StoreData>, StorageError>;

    /// Replaces the stored document.
    fn save(&mut self, data: &StoreData) -> Result<(), StorageError>;
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "
            -- state: whole-document key/value storage
            -- value: JSON text, replaced in full on every save
            CREATE TABLE IF NOT EXISTS state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads the raw value stored under `key`.
    pub fn get_state(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM state WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put_state(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let updated_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO state (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, value, updated_at],
        )?;
        Ok(())
    }
}

impl StatsStore for Database {
    fn load(&self) -> Result<Option<StoreData>, StorageError> {
        let Some(json) = self.get_state(STATS_KEY)? else {
            return Ok(None);
        };
        Ok(Some(StoreData::from_json(&json)?))
    }

    fn save(&mut self, data: &StoreData) -> Result<(), StorageError> {
        let json = data.to_json()?;
        self.put_state(STATS_KEY, &json)
    }
}
