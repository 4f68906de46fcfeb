//! Employee model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validate_not_blank;

use crate::board::Fingerprint;

/// Employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i64,
    /// Staff number, unique across the board
    pub employee_number: String,
    pub name: String,
    /// Owning department
    pub department_id: i64,
    /// Position inside the department (ascending)
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create employee request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 50, message = "Employee number must be 1-50 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub employee_number: String,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub department_id: i64,
}

/// Update employee request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 50, message = "Employee number must be 1-50 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub employee_number: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub department_id: Option<i64>,
}

/// Query parameters for employees
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Only employees of this department
    pub department_id: Option<i64>,
}

impl Fingerprint for Employee {
    fn sort_key(&self) -> i64 {
        self.id
    }

    fn fingerprint(&self) -> String {
        format!(
            "{}|{:?}|{:?}|{}|{}",
            self.id,
            self.employee_number,
            self.name,
            self.department_id,
            self.display_order
        )
    }
}
