//! Today command for showing the current day's breakdown.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use wk_core::{DailyStats, day_key, format_duration};
use wk_engine::Engine;

use crate::commands::util::display_name;

/// Number of files listed in the text output.
const TOP_FILES: usize = 5;

fn write_buckets<W: Write>(
    writer: &mut W,
    title: &str,
    buckets: &BTreeMap<String, u64>,
    limit: usize,
    label: impl Fn(&str) -> &str,
) -> Result<()> {
    if buckets.is_empty() {
        return Ok(());
    }
    writeln!(writer, "{title}:")?;
    for (name, seconds) in DailyStats::ranked(buckets).into_iter().take(limit) {
        writeln!(writer, "- {}: {}", label(name), format_duration(seconds))?;
    }
    Ok(())
}

pub fn format_today(stats: &DailyStats) -> Result<String> {
    let mut out = Vec::new();
    writeln!(
        out,
        "Today ({}): {}",
        stats.date,
        format_duration(stats.total_time)
    )?;
    write_buckets(&mut out, "Languages", &stats.languages, usize::MAX, |l| l)?;
    write_buckets(&mut out, "Top files", &stats.files, TOP_FILES, display_name)?;
    write_buckets(&mut out, "Projects", &stats.projects, usize::MAX, |p| p)?;
    Ok(String::from_utf8(out)?)
}

pub fn run<W: Write>(
    writer: &mut W,
    engine: &Engine,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let stats = engine.today_stats(now);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    match stats {
        Some(stats) => write!(writer, "{}", format_today(&stats)?)?,
        None => writeln!(writer, "No activity recorded today ({}).", day_key(now))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeDelta;
    use insta::assert_snapshot;
    use wk_core::{Activity, FileId, LanguageId, ProjectId};
    use wk_db::Database;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-29T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn record(engine: &Engine, file: &str, language: &str, times: usize) {
        let activity = Activity::new(
            FileId::new(file).unwrap(),
            LanguageId::new(language).unwrap(),
        );
        for _ in 0..times {
            engine.record(t0(), &activity).unwrap();
        }
    }

    #[test]
    fn today_without_activity() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        let mut output = Vec::new();
        run(&mut output, &engine, t0(), false).unwrap();
        assert_snapshot!(
            String::from_utf8(output).unwrap(),
            @"No activity recorded today (2025-01-29)."
        );
    }

    #[test]
    fn today_json_without_activity_is_null() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        let mut output = Vec::new();
        run(&mut output, &engine, t0(), true).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "null\n");
    }

    #[test]
    fn today_lists_ranked_buckets() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        record(&engine, "/src/main.rs", "rust", 70);
        record(&engine, "/src/lib.rs", "rust", 3);
        record(&engine, "/web/app.ts", "typescript", 5);
        engine
            .record(
                t0(),
                &Activity::new(
                    FileId::new("/web/app.ts").unwrap(),
                    LanguageId::new("typescript").unwrap(),
                )
                .with_project(ProjectId::new("web").unwrap()),
            )
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &engine, t0() + TimeDelta::hours(1), false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Today (2025-01-29): 1m 19s
        Languages:
        - rust: 1m 13s
        - typescript: 6s
        Top files:
        - main.rs: 1m 10s
        - app.ts: 6s
        - lib.rs: 3s
        Projects:
        - web: 1s
        ");
    }

    #[test]
    fn today_limits_file_list() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        for (i, name) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            record(&engine, &format!("{name}.rs"), "rust", i + 1);
        }
        let text = format_today(&engine.today_stats(t0()).unwrap()).unwrap();
        assert!(text.contains("- g.rs: 7s"));
        assert!(text.contains("- c.rs: 3s"));
        assert!(!text.contains("b.rs"));
        assert!(!text.contains("a.rs"));
    }

    #[test]
    fn today_json_uses_stored_field_names() {
        let engine = Engine::new(Database::open_in_memory().unwrap(), t0());
        record(&engine, "a.ts", "typescript", 2);

        let mut output = Vec::new();
        run(&mut output, &engine, t0(), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["date"], "2025-01-29");
        assert_eq!(value["totalTime"], 2);
        assert_eq!(value["languages"]["typescript"], 2);
        assert_eq!(value["files"]["a.ts"], 2);
    }
}
