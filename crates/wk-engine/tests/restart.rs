//! Engine behaviour across simulated process restarts.

use chrono::{DateTime, TimeDelta, Utc};
use tempfile::TempDir;

use wk_core::{FileId, LanguageId};
use wk_db::Database;
use wk_engine::Engine;

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-01-29T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn open(temp: &TempDir, now: DateTime<Utc>) -> Engine {
    let db = Database::open(&temp.path().join("wk.db")).expect("open database");
    Engine::new(db, now)
}

#[test]
fn daily_stats_persist_but_session_does_not() {
    let temp = TempDir::new().unwrap();
    let file = FileId::new("/src/a.ts").unwrap();
    let language = LanguageId::new("typescript").unwrap();

    {
        let engine = open(&temp, t0());
        engine.start().unwrap();
        engine.record_activity(t0(), &file, &language).unwrap();
        for s in 1..=30 {
            engine.tick(t0() + TimeDelta::seconds(s));
        }
        assert!(engine.session_stats().total_time >= 30);
        // Dropped without an explicit stop.
    }

    let restarted_at = t0() + TimeDelta::minutes(5);
    let engine = open(&temp, restarted_at);
    let session = engine.session_stats();
    assert_eq!(session.total_time, 0);
    assert_eq!(session.start_time, restarted_at);
    assert!(session.current_file.is_none());

    engine
        .record_activity(restarted_at, &file, &language)
        .unwrap();
    let today = engine.today_stats(restarted_at).expect("today");
    assert_eq!(today.total_time, 2);
    assert_eq!(today.files["/src/a.ts"], 2);
}

#[test]
fn reset_is_visible_after_restart() {
    let temp = TempDir::new().unwrap();
    {
        let engine = open(&temp, t0());
        engine
            .record_activity(
                t0(),
                &FileId::new("a.ts").unwrap(),
                &LanguageId::new("typescript").unwrap(),
            )
            .unwrap();
        engine.reset_stats(t0() + TimeDelta::seconds(1)).unwrap();
    }

    let engine = open(&temp, t0() + TimeDelta::minutes(1));
    assert!(engine.all_stats().is_empty());
}
