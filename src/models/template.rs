//! Schedule template model (reusable shifts)

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{validate_not_blank, COLOR_RE};

/// A named shift that can be stamped onto any employee and day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleTemplate {
    pub id: i64,
    /// Template name shown in the picker
    pub name: String,
    /// Title given to schedules created from this template
    pub title: String,
    pub color: String,
    /// Local start time
    pub start_time: NaiveTime,
    /// Local end time; at or before `start_time` means the next day
    pub end_time: NaiveTime,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create template request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTemplate {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(regex(path = *COLOR_RE, message = "Color must be #RRGGBB"))]
    pub color: Option<String>,
    /// Start time (HH:MM)
    pub start_time: String,
    /// End time (HH:MM)
    pub end_time: String,
}

/// Update template request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTemplate {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(regex(path = *COLOR_RE, message = "Color must be #RRGGBB"))]
    pub color: Option<String>,
    /// Start time (HH:MM)
    pub start_time: Option<String>,
    /// End time (HH:MM)
    pub end_time: Option<String>,
}

/// Apply a template to one employee on one day
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyTemplate {
    pub employee_id: i64,
    /// Day in the board timezone (YYYY-MM-DD)
    pub date: String,
}
