//! Department model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::validate_not_blank;

use crate::board::Fingerprint;

/// Department record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i64,
    /// Department name
    pub name: String,
    /// Position on the board (ascending)
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create department request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDepartment {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
}

/// Update department request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
}

impl Fingerprint for Department {
    fn sort_key(&self) -> i64 {
        self.id
    }

    fn fingerprint(&self) -> String {
        format!("{}|{:?}|{}", self.id, self.name, self.display_order)
    }
}
