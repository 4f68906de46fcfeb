//! Repository layer for database operations

pub mod departments;
pub mod employees;
pub mod equipment;
mod ordering;
pub mod reservations;
pub mod schedules;
pub mod templates;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: SqlitePool,
    pub departments: departments::DepartmentsRepository,
    pub employees: employees::EmployeesRepository,
    pub equipment: equipment::EquipmentRepository,
    pub schedules: schedules::SchedulesRepository,
    pub reservations: reservations::ReservationsRepository,
    pub templates: templates::TemplatesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            departments: departments::DepartmentsRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            templates: templates::TemplatesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Open the SQLite pool (WAL, foreign keys on) and apply embedded migrations.
pub async fn connect(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| AppError::Internal(format!("Invalid database url: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);

    // Every connection to `:memory:` is a separate database; keep the one we have
    if config.url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;
    tracing::info!("Database connection established ({})", config.url);

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
