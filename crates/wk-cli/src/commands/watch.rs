//! Watch command for tracking a live session from streamed activity events.
//!
//! Reads one JSON object per line:
//!
//! ```text
//! {"file": "/src/main.rs", "language": "rust", "project": "wk"}
//! ```
//!
//! Malformed lines and events that fail to persist are logged and skipped;
//! the session keeps running.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use wk_core::{Activity, SessionStats, format_duration};
use wk_engine::Engine;

/// Counts of processed input lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatchSummary {
    pub recorded: usize,
    pub skipped: usize,
}

pub fn format_session(session: &SessionStats, summary: WatchSummary) -> String {
    let mut out = format!(
        "Session: {} (started {})\nEvents: {} recorded, {} skipped\n",
        format_duration(session.total_time),
        session
            .start_time
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        summary.recorded,
        summary.skipped,
    );
    if let (Some(file), Some(language)) = (&session.current_file, &session.current_language) {
        out.push_str(&format!("Last file: {file} ({language})\n"));
    }
    out
}

/// Feeds events from `reader` into a running engine until EOF.
///
/// `clock` supplies the timestamp for each event.
pub fn run<R, W, C>(
    reader: R,
    writer: &mut W,
    engine: &Engine,
    mut clock: C,
) -> Result<WatchSummary>
where
    R: BufRead,
    W: Write,
    C: FnMut() -> DateTime<Utc>,
{
    engine.start().context("failed to start session ticker")?;
    let mut summary = WatchSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read activity event")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let activity: Activity = match serde_json::from_str(line) {
            Ok(activity) => activity,
            Err(err) => {
                tracing::warn!(line = index + 1, error = %err, "skipping malformed activity event");
                summary.skipped += 1;
                continue;
            }
        };

        match engine.record(clock(), &activity) {
            Ok(stats) => {
                tracing::debug!(
                    file = %activity.file,
                    total = stats.total_time,
                    "activity recorded"
                );
                summary.recorded += 1;
            }
            Err(err) => {
                tracing::warn!(line = index + 1, error = %err, "activity may not be durable");
                summary.skipped += 1;
            }
        }
    }

    engine.stop();
    write!(writer, "{}", format_session(&engine.session_stats(), summary))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use chrono::TimeDelta;
    use insta::assert_snapshot;
    use wk_db::Database;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-29T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn watch_records_events_and_stops_ticker() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        let input = concat!(
            "{\"file\": \"/src/a.ts\", \"language\": \"typescript\"}\n",
            "\n",
            "not json\n",
            "{\"file\": \"\", \"language\": \"typescript\"}\n",
            "{\"file\": \"/src/b.rs\", \"language\": \"rust\", \"project\": \"wk\"}\n",
        );

        let mut seconds = 0;
        let clock = || {
            seconds += 5;
            t0() + TimeDelta::seconds(seconds)
        };

        let mut output = Vec::new();
        let summary = run(Cursor::new(input), &mut output, &engine, clock).unwrap();

        assert_eq!(
            summary,
            WatchSummary {
                recorded: 2,
                skipped: 2
            }
        );
        assert!(!engine.is_running());

        let today = engine.today_stats(t0()).unwrap();
        assert_eq!(today.total_time, 2);
        assert_eq!(today.projects["wk"], 1);

        // The ticker runs on the wall clock, far past the idle threshold of
        // the 2025 session, so no session time accrues.
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Session: 0s (started 2025-01-29T10:00:00Z)
        Events: 2 recorded, 2 skipped
        Last file: /src/b.rs (rust)
        ");
    }

    #[test]
    fn watch_with_no_input() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        let mut output = Vec::new();
        let summary = run(Cursor::new(""), &mut output, &engine, t0).unwrap();
        assert_eq!(summary, WatchSummary::default());
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Session: 0s (started 2025-01-29T10:00:00Z)
        Events: 0 recorded, 0 skipped
        ");
    }
}
