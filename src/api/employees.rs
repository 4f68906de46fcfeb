//! Employee API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee},
        ordering::{MoveRequest, OrderUpdate},
    },
    AppState,
};

/// List employees
#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employee list", body = Vec<Employee>)
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.services.employees.list(&query).await?;
    Ok(Json(employees))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = Employee)
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let employee = state.services.employees.get_by_id(id).await?;
    Ok(Json(employee))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 409, description = "Employee number already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(data): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let employee = state.services.employees.create(&data).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = i64, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee)
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    let employee = state.services.employees.update(id, &data).await?;
    Ok(Json(employee))
}

/// Delete an employee and their schedules
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move an employee one step within their department
#[utoipa::path(
    put,
    path = "/employees/{id}/move",
    tag = "employees",
    params(("id" = i64, Path, description = "Employee ID")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Reordered employee list", body = Vec<Employee>)
    )
)]
pub async fn move_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<MoveRequest>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.services.employees.move_item(id, data.direction).await?;
    Ok(Json(employees))
}

/// Set employee order in bulk
#[utoipa::path(
    put,
    path = "/employees/order/update",
    tag = "employees",
    request_body = OrderUpdate,
    responses(
        (status = 200, description = "Reordered employee list", body = Vec<Employee>)
    )
)]
pub async fn update_employee_order(
    State(state): State<AppState>,
    Json(data): Json<OrderUpdate>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.services.employees.update_order(&data).await?;
    Ok(Json(employees))
}
