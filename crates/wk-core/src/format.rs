//! Human-readable rendering of second counts.

use crate::types::ValidationError;

/// Formats a number of seconds as a short duration string.
///
/// Values of an hour or more render as `"{h}h {m}m"` (seconds dropped),
/// values of a minute or more as `"{m}m {s}s"`, everything else as `"{s}s"`.
/// Components are truncated, never rounded.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Formats a signed number of seconds, rejecting negative input.
pub fn try_format_duration(seconds: i64) -> Result<String, ValidationError> {
    u64::try_from(seconds)
        .map(format_duration)
        .map_err(|_| ValidationError::NegativeDuration { value: seconds })
}
