//! Data models for Planboard

pub mod department;
pub mod employee;
pub mod equipment;
pub mod ordering;
pub mod reservation;
pub mod schedule;
pub mod template;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

// Re-export commonly used types
pub use department::Department;
pub use employee::Employee;
pub use equipment::Equipment;
pub use ordering::{MoveDirection, OrderUpdate};
pub use reservation::EquipmentReservation;
pub use schedule::Schedule;
pub use template::ScheduleTemplate;

/// Color assigned when a request does not specify one
pub const DEFAULT_COLOR: &str = "#3b82f6";

pub(crate) static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

/// Rejects text made only of whitespace; stored values are trimmed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Must not be blank".into());
        return Err(error);
    }
    Ok(())
}
