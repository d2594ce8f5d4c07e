//! Reset command for deleting all statistics.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};

use wk_engine::Engine;

pub fn run<W: Write>(
    writer: &mut W,
    engine: &Engine,
    confirmed: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    if !confirmed {
        bail!("refusing to delete all statistics without --yes");
    }
    engine.reset_stats(now).context("failed to reset statistics")?;
    writeln!(writer, "All statistics deleted.")?;
    Ok(())
}
