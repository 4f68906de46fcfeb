//! Equipment API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        ordering::{MoveRequest, OrderUpdate},
    },
    AppState,
};

/// List all equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(State(state): State<AppState>) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment)
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment)
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment)
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment and its reservations
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted")
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move equipment one step up or down
#[utoipa::path(
    put,
    path = "/equipment/{id}/move",
    tag = "equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Reordered equipment list", body = Vec<Equipment>)
    )
)]
pub async fn move_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<MoveRequest>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.move_item(id, data.direction).await?;
    Ok(Json(equipment))
}

/// Set equipment order in bulk
#[utoipa::path(
    put,
    path = "/equipment/order/update",
    tag = "equipment",
    request_body = OrderUpdate,
    responses(
        (status = 200, description = "Reordered equipment list", body = Vec<Equipment>)
    )
)]
pub async fn update_equipment_order(
    State(state): State<AppState>,
    Json(data): Json<OrderUpdate>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.update_order(&data).await?;
    Ok(Json(equipment))
}
