//! Accounting engine for the activity time tracker.
//!
//! The [`Engine`] is the composition root handed to the editor integration.
//! It owns the in-memory session, the [`DailyAggregator`](wk_db::DailyAggregator)
//! and the [`Ticker`] that advances the session once per period.

mod engine;
mod ticker;

use std::time::Duration;

use thiserror::Error;

use wk_core::DEFAULT_IDLE_THRESHOLD;
use wk_db::StorageError;

pub use engine::Engine;
pub use ticker::Ticker;

/// Default period between session ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Statistics could not be persisted; the event may not be durable.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The ticker thread could not be started.
    #[error("failed to start ticker: {0}")]
    Ticker(#[from] std::io::Error),
}

/// Tunables for an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Gap after the last activity beyond which ticks stop counting.
    pub idle_threshold: Duration,
    /// Period of the session ticker. Each tick counts as one second, so
    /// anything other than one second skews session totals.
    pub tick_interval: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            idle_threshold: DEFAULT_IDLE_THRESHOLD,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}
