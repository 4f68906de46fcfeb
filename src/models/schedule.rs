//! Schedule model (employee time blocks)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{validate_not_blank, COLOR_RE};
use crate::board::{signature::timestamp, Booking, Fingerprint};

/// A block of an employee's time, half-open `[start_datetime, end_datetime)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: i64,
    /// Owning employee
    pub employee_id: i64,
    pub title: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    /// Display color (#RRGGBB)
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create schedule request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSchedule {
    pub employee_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    /// Start (RFC 3339, any offset)
    pub start_datetime: DateTime<Utc>,
    /// End (RFC 3339, any offset), exclusive
    pub end_datetime: DateTime<Utc>,
    #[validate(regex(path = *COLOR_RE, message = "Color must be #RRGGBB"))]
    pub color: Option<String>,
}

/// Update schedule request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSchedule {
    pub employee_id: Option<i64>,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    #[validate(regex(path = *COLOR_RE, message = "Color must be #RRGGBB"))]
    pub color: Option<String>,
}

/// Query parameters for schedules
///
/// Either an explicit `start`/`end` window or a `year`/`month` pair in the
/// board timezone; bookings intersecting the window are returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct ScheduleQuery {
    pub employee_id: Option<i64>,
    pub department_id: Option<i64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl Booking for Schedule {
    type Owner = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn owner(&self) -> i64 {
        self.employee_id
    }

    fn start(&self) -> DateTime<Utc> {
        self.start_datetime
    }

    fn end(&self) -> DateTime<Utc> {
        self.end_datetime
    }
}

impl Fingerprint for Schedule {
    fn sort_key(&self) -> i64 {
        self.id
    }

    fn fingerprint(&self) -> String {
        format!(
            "{}|{}|{:?}|{}|{}|{:?}",
            self.id,
            self.employee_id,
            self.title,
            timestamp(&self.start_datetime),
            timestamp(&self.end_datetime),
            self.color
        )
    }
}
