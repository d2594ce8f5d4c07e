//! Record command for reporting a single activity event.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use wk_core::{Activity, FileId, LanguageId, ProjectId, format_duration};
use wk_engine::Engine;

use crate::RecordArgs;
use crate::commands::util::parse_timestamp;

/// Builds the activity described by the arguments.
fn activity_from_args(args: &RecordArgs) -> Result<Activity> {
    let file = FileId::new(args.file.as_str()).context("invalid --file")?;
    let language = LanguageId::new(args.language.as_str()).context("invalid --language")?;
    let mut activity = Activity::new(file, language);
    if let Some(project) = &args.project {
        let project = ProjectId::new(project.as_str()).context("invalid --project")?;
        activity = activity.with_project(project);
    }
    Ok(activity)
}

pub fn run<W: Write>(
    writer: &mut W,
    engine: &Engine,
    args: &RecordArgs,
    now: DateTime<Utc>,
) -> Result<()> {
    let at = match &args.at {
        Some(at) => parse_timestamp(at).context("invalid --at")?,
        None => now,
    };
    let activity = activity_from_args(args)?;

    let stats = engine
        .record(at, &activity)
        .context("failed to save activity; it may not have been recorded")?;

    writeln!(
        writer,
        "Recorded {} ({}) on {}: {} today",
        activity.file,
        activity.language,
        stats.date,
        format_duration(stats.total_time)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use wk_db::Database;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-29T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn args(file: &str, language: &str) -> RecordArgs {
        RecordArgs {
            file: file.to_string(),
            language: language.to_string(),
            project: None,
            at: None,
        }
    }

    #[test]
    fn record_reports_running_total() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        let mut output = Vec::new();
        run(&mut output, &engine, &args("a.ts", "typescript"), t0()).unwrap();
        run(&mut output, &engine, &args("a.ts", "typescript"), t0()).unwrap();

        let output = String::from_utf8(output).unwrap();
        insta::assert_snapshot!(output, @r"
        Recorded a.ts (typescript) on 2025-01-29: 1s today
        Recorded a.ts (typescript) on 2025-01-29: 2s today
        ");
    }

    #[test]
    fn record_uses_explicit_timestamp() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        let mut record = args("a.ts", "typescript");
        record.at = Some("2025-02-01T08:00:00Z".to_string());
        run(&mut Vec::new(), &engine, &record, t0()).unwrap();

        assert!(engine.today_stats(t0()).is_none());
        let at = parse_timestamp("2025-02-01T08:00:00Z").unwrap();
        assert_eq!(engine.today_stats(at).unwrap().total_time, 1);
    }

    #[test]
    fn record_with_project() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        let mut record = args("a.ts", "typescript");
        record.project = Some("web".to_string());
        run(&mut Vec::new(), &engine, &record, t0()).unwrap();
        assert_eq!(engine.today_stats(t0()).unwrap().projects["web"], 1);
    }

    #[test]
    fn record_rejects_bad_input() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());

        let mut bad_time = args("a.ts", "typescript");
        bad_time.at = Some("not a time".to_string());
        assert!(run(&mut Vec::new(), &engine, &bad_time, t0()).is_err());

        assert!(run(&mut Vec::new(), &engine, &args("", "typescript"), t0()).is_err());
        assert!(run(&mut Vec::new(), &engine, &args("a.ts", ""), t0()).is_err());
        assert!(engine.all_stats().is_empty());
    }
}
