//! Equipment reservation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{validate_not_blank, COLOR_RE};
use crate::board::{signature::timestamp, Booking, Fingerprint};

/// A booking of one piece of equipment, half-open `[start_datetime, end_datetime)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentReservation {
    pub id: i64,
    /// Reserved equipment
    pub equipment_id: i64,
    pub title: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    /// Display color (#RRGGBB)
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create reservation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    pub equipment_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    #[validate(regex(path = *COLOR_RE, message = "Color must be #RRGGBB"))]
    pub color: Option<String>,
}

/// Update reservation request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReservation {
    pub equipment_id: Option<i64>,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    #[validate(regex(path = *COLOR_RE, message = "Color must be #RRGGBB"))]
    pub color: Option<String>,
}

/// Query parameters for reservations
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct ReservationQuery {
    pub equipment_id: Option<i64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// One existing reservation blocking a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConflictingReservation {
    pub id: i64,
    pub title: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
}

/// Details attached to an `EQUIPMENT_CONFLICT` error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConflictDetails {
    pub equipment_id: i64,
    pub requested_start: DateTime<Utc>,
    pub requested_end: DateTime<Utc>,
    pub conflicts: Vec<ConflictingReservation>,
}

impl From<&EquipmentReservation> for ConflictingReservation {
    fn from(r: &EquipmentReservation) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            start_datetime: r.start_datetime,
            end_datetime: r.end_datetime,
        }
    }
}

impl Booking for EquipmentReservation {
    type Owner = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn owner(&self) -> i64 {
        self.equipment_id
    }

    fn start(&self) -> DateTime<Utc> {
        self.start_datetime
    }

    fn end(&self) -> DateTime<Utc> {
        self.end_datetime
    }
}

impl Fingerprint for EquipmentReservation {
    fn sort_key(&self) -> i64 {
        self.id
    }

    fn fingerprint(&self) -> String {
        format!(
            "{}|{}|{:?}|{}|{}|{:?}",
            self.id,
            self.equipment_id,
            self.title,
            timestamp(&self.start_datetime),
            timestamp(&self.end_datetime),
            self.color
        )
    }
}
