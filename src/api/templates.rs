//! Schedule template API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        schedule::Schedule,
        template::{ApplyTemplate, CreateTemplate, ScheduleTemplate, UpdateTemplate},
    },
    AppState,
};

/// List templates
#[utoipa::path(
    get,
    path = "/templates",
    tag = "templates",
    responses(
        (status = 200, description = "Template list", body = Vec<ScheduleTemplate>)
    )
)]
pub async fn list_templates(State(state): State<AppState>) -> AppResult<Json<Vec<ScheduleTemplate>>> {
    let templates = state.services.templates.list().await?;
    Ok(Json(templates))
}

/// Get template by ID
#[utoipa::path(
    get,
    path = "/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template details", body = ScheduleTemplate)
    )
)]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ScheduleTemplate>> {
    let template = state.services.templates.get_by_id(id).await?;
    Ok(Json(template))
}

/// Create a template
#[utoipa::path(
    post,
    path = "/templates",
    tag = "templates",
    request_body = CreateTemplate,
    responses(
        (status = 201, description = "Template created", body = ScheduleTemplate)
    )
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(data): Json<CreateTemplate>,
) -> AppResult<(StatusCode, Json<ScheduleTemplate>)> {
    let template = state.services.templates.create(&data).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// Update a template
#[utoipa::path(
    put,
    path = "/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template ID")),
    request_body = UpdateTemplate,
    responses(
        (status = 200, description = "Template updated", body = ScheduleTemplate)
    )
)]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateTemplate>,
) -> AppResult<Json<ScheduleTemplate>> {
    let template = state.services.templates.update(id, &data).await?;
    Ok(Json(template))
}

/// Delete a template
#[utoipa::path(
    delete,
    path = "/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template deleted")
    )
)]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.templates.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stamp a template onto an employee's day
#[utoipa::path(
    post,
    path = "/templates/{id}/apply",
    tag = "templates",
    params(("id" = i64, Path, description = "Template ID")),
    request_body = ApplyTemplate,
    responses(
        (status = 201, description = "Schedule created from template", body = Schedule)
    )
)]
pub async fn apply_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<ApplyTemplate>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    let schedule = state.services.templates.apply(id, &data).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}
