//! CLI subcommand implementations.

pub mod record;
pub mod reset;
pub mod stats;
pub mod today;
pub mod util;
pub mod watch;
