use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wk_cli::commands::{record, reset, stats, today, watch};
use wk_cli::{Cli, Commands, Config};
use wk_engine::Engine;

/// Load config and open the engine, ensuring the database directory exists.
fn open_engine(config_path: Option<&Path>) -> Result<Engine> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = wk_db::Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Ok(Engine::with_settings(db, Utc::now(), config.engine_settings()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let engine = open_engine(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Record(args) => record::run(&mut stdout, &engine, args, Utc::now())?,
        Commands::Today { json } => today::run(&mut stdout, &engine, Utc::now(), *json)?,
        Commands::Stats { json } => stats::run(&mut stdout, &engine, *json)?,
        Commands::Reset { yes } => reset::run(&mut stdout, &engine, *yes, Utc::now())?,
        Commands::Watch => {
            let summary = watch::run(io::stdin().lock(), &mut stdout, &engine, Utc::now)?;
            tracing::debug!(?summary, "watch finished");
        }
    }

    Ok(())
}
