//! Schedule API endpoints (employee time blocks)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::schedule::{CreateSchedule, Schedule, ScheduleQuery, UpdateSchedule},
    AppState,
};

/// List schedules intersecting a window
#[utoipa::path(
    get,
    path = "/schedules",
    tag = "schedules",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Schedules", body = Vec<Schedule>)
    )
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<Vec<Schedule>>> {
    let schedules = state.services.schedules.list(&query).await?;
    Ok(Json(schedules))
}

/// Get schedule by ID
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    tag = "schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule details", body = Schedule)
    )
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Schedule>> {
    let schedule = state.services.schedules.get_by_id(id).await?;
    Ok(Json(schedule))
}

/// Create a schedule
#[utoipa::path(
    post,
    path = "/schedules",
    tag = "schedules",
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = Schedule),
        (status = 400, description = "Invalid interval", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(data): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    let schedule = state.services.schedules.create(&data).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Update a schedule (move, resize, reassign or edit)
#[utoipa::path(
    put,
    path = "/schedules/{id}",
    tag = "schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule)
    )
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateSchedule>,
) -> AppResult<Json<Schedule>> {
    let schedule = state.services.schedules.update(id, &data).await?;
    Ok(Json(schedule))
}

/// Delete a schedule
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    tag = "schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted")
    )
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
