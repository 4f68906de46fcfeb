//! Configuration management for Planboard server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::board::{BoardClock, SlotGrid};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Board presentation settings shared by the server and the poller
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    /// Slot length in minutes; must divide a day evenly
    pub slot_minutes: u32,
    /// Board wall-clock offset east of UTC, in minutes
    pub utc_offset_minutes: i32,
    /// Poller refresh interval
    pub poll_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (PLANBOARD_DATABASE__URL, ...)
            .add_source(
                Environment::with_prefix("PLANBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override database URL from DATABASE_URL env var if present
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.board.slot_grid().ok_or_else(|| {
            ConfigError::Message(format!(
                "board.slot_minutes must divide 1440, got {}",
                config.board.slot_minutes
            ))
        })?;
        Ok(config)
    }
}

impl BoardConfig {
    pub fn slot_grid(&self) -> Option<SlotGrid> {
        SlotGrid::new(self.slot_minutes)
    }

    pub fn clock(&self) -> BoardClock {
        BoardClock::from_offset_minutes(self.utc_offset_minutes)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://planboard.db".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            slot_minutes: 15,
            utc_offset_minutes: 0,
            poll_interval_ms: 3000,
        }
    }
}
