//! Shared utilities for CLI commands.

use std::path::Path;

use chrono::{DateTime, Utc};

use wk_core::ValidationError;

/// Parses an ISO 8601 timestamp (e.g., "2026-01-15T10:30:00Z").
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidTimestamp {
            value: s.to_string(),
        })
}

/// Returns the last path component of a file ID, or the whole ID if it has none.
pub fn display_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}
