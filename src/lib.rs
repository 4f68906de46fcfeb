//! Planboard Scheduling Server
//!
//! A REST JSON API for a departmental scheduling board: employees and their
//! schedules, equipment and its reservations, and the slot grid model that
//! drives drag and resize interactions on the board.

use std::sync::Arc;

pub mod api;
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use api::create_router;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Connect the database, run migrations and wire up services
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let pool = repository::connect(&config.database).await?;
        let services = services::Services::new(repository::Repository::new(pool), config.board.clock());
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
