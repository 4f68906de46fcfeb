//! Department API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        department::{CreateDepartment, Department, UpdateDepartment},
        ordering::{MoveRequest, OrderUpdate},
    },
    AppState,
};

/// List departments in board order
#[utoipa::path(
    get,
    path = "/departments",
    tag = "departments",
    responses(
        (status = 200, description = "Department list", body = Vec<Department>)
    )
)]
pub async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    let departments = state.services.departments.list().await?;
    Ok(Json(departments))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "departments",
    params(("id" = i64, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = Department),
        (status = 404, description = "Department not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Department>> {
    let department = state.services.departments.get_by_id(id).await?;
    Ok(Json(department))
}

/// Create a department (appended at the end)
#[utoipa::path(
    post,
    path = "/departments",
    tag = "departments",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department)
    )
)]
pub async fn create_department(
    State(state): State<AppState>,
    Json(data): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    let department = state.services.departments.create(&data).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "departments",
    params(("id" = i64, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = Department)
    )
)]
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    let department = state.services.departments.update(id, &data).await?;
    Ok(Json(department))
}

/// Delete a department
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "departments",
    params(("id" = i64, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 409, description = "Department still has employees", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.departments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move a department one step up or down
#[utoipa::path(
    put,
    path = "/departments/{id}/move",
    tag = "departments",
    params(("id" = i64, Path, description = "Department ID")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Reordered department list", body = Vec<Department>)
    )
)]
pub async fn move_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<MoveRequest>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = state.services.departments.move_item(id, data.direction).await?;
    Ok(Json(departments))
}

/// Set department order in bulk
#[utoipa::path(
    put,
    path = "/departments/order/update",
    tag = "departments",
    request_body = OrderUpdate,
    responses(
        (status = 200, description = "Reordered department list", body = Vec<Department>)
    )
)]
pub async fn update_department_order(
    State(state): State<AppState>,
    Json(data): Json<OrderUpdate>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = state.services.departments.update_order(&data).await?;
    Ok(Json(departments))
}
