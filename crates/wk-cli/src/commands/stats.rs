//! Stats command for listing every recorded day.

use std::io::Write;

use anyhow::Result;

use wk_core::format_duration;
use wk_engine::Engine;

pub fn run<W: Write>(writer: &mut W, engine: &Engine, json: bool) -> Result<()> {
    let all = engine.all_stats();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&all)?)?;
        return Ok(());
    }

    if all.is_empty() {
        writeln!(writer, "No activity recorded yet.")?;
        return Ok(());
    }

    let total = all
        .values()
        .fold(0_u64, |total, stats| total.saturating_add(stats.total_time));
    writeln!(writer, "All time: {}", format_duration(total))?;
    // Newest first.
    for (date, stats) in all.iter().rev() {
        writeln!(writer, "- {date}: {}", format_duration(stats.total_time))?;
    }
    Ok(())
}
