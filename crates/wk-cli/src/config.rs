//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use wk_engine::EngineSettings;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Seconds without activity after which the session stops counting.
    pub idle_threshold_secs: u64,
    /// Milliseconds between session ticks.
    pub tick_interval_ms: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("idle_threshold_secs", &self.idle_threshold_secs)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        let settings = EngineSettings::default();
        Self {
            database_path: data_dir.join("wk.db"),
            idle_threshold_secs: settings.idle_threshold.as_secs(),
            tick_interval_ms: u64::try_from(settings.tick_interval.as_millis())
                .unwrap_or(1000),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WK_*)
        figment = figment.merge(Env::prefixed("WK_"));

        let config: Self = figment.extract()?;
        if config.tick_interval_ms == 0 {
            return Err(figment::Error::from(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Engine settings derived from this configuration.
    pub const fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            idle_threshold: Duration::from_secs(self.idle_threshold_secs),
            tick_interval: Duration::from_millis(self.tick_interval_ms),
        }
    }
}

/// Returns the platform-specific config directory for wk.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wk"))
}

/// Returns the platform-specific data directory for wk.
///
/// On Linux: `~/.local/share/wk`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wk"))
}
