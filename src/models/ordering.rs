//! Display ordering requests shared by departments, employees and equipment

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Direction for a single-step move in an ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Move request body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

/// One entry of a bulk order update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub display_order: i64,
}

/// Bulk order update request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderUpdate {
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<OrderItem>,
}
