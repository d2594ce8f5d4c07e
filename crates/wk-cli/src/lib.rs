//! Activity time tracker CLI library.
//!
//! This crate provides the command-line host for the accounting engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, RecordArgs};
pub use config::Config;
