//! Error types for Planboard server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::reservation::ConflictDetails;

/// Machine-readable error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 2,
    NotFound = 3,
    BadValue = 4,
    Duplicate = 5,
    EquipmentConflict = 6,
    DepartmentNotEmpty = 7,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Failure => "FAILURE",
            ErrorCode::DbFailure => "DB_FAILURE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BadValue => "BAD_VALUE",
            ErrorCode::Duplicate => "DUPLICATE",
            ErrorCode::EquipmentConflict => "EQUIPMENT_CONFLICT",
            ErrorCode::DepartmentNotEmpty => "DEPARTMENT_NOT_EMPTY",
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {1}")]
    Conflict(ErrorCode, String),

    #[error("Equipment {} is already reserved in the requested period", .0.equipment_id)]
    EquipmentConflict(Box<ConflictDetails>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    /// Error code, e.g. `EQUIPMENT_CONFLICT`
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Map a unique-constraint violation to `DUPLICATE`, everything else to a
    /// plain database error.
    pub fn from_write(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(ErrorCode::Duplicate, format!("{} already exists", what))
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Validation(format!("{} references a missing record", what))
            }
            _ => AppError::Database(err),
        }
    }

    fn parts(&self) -> (StatusCode, ErrorCode, String, Option<serde_json::Value>) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone(), None),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone(), None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone(), None)
            }
            AppError::Conflict(code, msg) => (StatusCode::CONFLICT, *code, msg.clone(), None),
            AppError::EquipmentConflict(details) => (
                StatusCode::CONFLICT,
                ErrorCode::EquipmentConflict,
                self.to_string(),
                serde_json::to_value(details.as_ref()).ok(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
