//! Core domain logic for the activity time tracker.
//!
//! This crate contains the pure, I/O-free pieces of the accounting engine:
//! - Formatting: rendering second counts as short human-readable durations
//! - Activity clock: deciding whether the user is active or idle at a tick
//! - Session accumulation: the in-memory count of active seconds
//! - Persisted schema: the per-day statistics document and its day keys

pub mod clock;
mod format;
pub mod session;
pub mod stats;
pub mod types;

pub use clock::{ActivityClock, DEFAULT_IDLE_THRESHOLD};
pub use format::{format_duration, try_format_duration};
pub use session::{SessionAccumulator, SessionStats};
pub use stats::{ActivityRecord, DailyStats, StoreData, day_key};
pub use types::{Activity, FileId, LanguageId, ProjectId, ValidationError};
