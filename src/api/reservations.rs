//! Equipment reservation API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::reservation::{
        CreateReservation, EquipmentReservation, ReservationQuery, UpdateReservation,
    },
    AppState,
};

/// List reservations intersecting a window
#[utoipa::path(
    get,
    path = "/equipment-reservations",
    tag = "equipment-reservations",
    params(ReservationQuery),
    responses(
        (status = 200, description = "Reservations", body = Vec<EquipmentReservation>)
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<Vec<EquipmentReservation>>> {
    let reservations = state.services.reservations.list(&query).await?;
    Ok(Json(reservations))
}

/// Get reservation by ID
#[utoipa::path(
    get,
    path = "/equipment-reservations/{id}",
    tag = "equipment-reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = EquipmentReservation)
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EquipmentReservation>> {
    let reservation = state.services.reservations.get_by_id(id).await?;
    Ok(Json(reservation))
}

/// Reserve equipment
#[utoipa::path(
    post,
    path = "/equipment-reservations",
    tag = "equipment-reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = EquipmentReservation),
        (status = 409, description = "Equipment already reserved (EQUIPMENT_CONFLICT)", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(data): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<EquipmentReservation>)> {
    let reservation = state.services.reservations.create(&data).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Update a reservation
#[utoipa::path(
    put,
    path = "/equipment-reservations/{id}",
    tag = "equipment-reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    request_body = UpdateReservation,
    responses(
        (status = 200, description = "Reservation updated", body = EquipmentReservation),
        (status = 409, description = "Equipment already reserved (EQUIPMENT_CONFLICT)", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateReservation>,
) -> AppResult<Json<EquipmentReservation>> {
    let reservation = state.services.reservations.update(id, &data).await?;
    Ok(Json(reservation))
}

/// Delete a reservation
#[utoipa::path(
    delete,
    path = "/equipment-reservations/{id}",
    tag = "equipment-reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 204, description = "Reservation deleted")
    )
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.reservations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
