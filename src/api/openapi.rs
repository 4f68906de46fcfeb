//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{departments, employees, equipment, health, reservations, schedules, templates};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Planboard API",
        version = "0.1.0",
        description = "Scheduling and equipment reservation board REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "Board API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Departments
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
        departments::move_department,
        departments::update_department_order,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        employees::move_employee,
        employees::update_employee_order,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::move_equipment,
        equipment::update_equipment_order,
        // Schedules
        schedules::list_schedules,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
        reservations::update_reservation,
        reservations::delete_reservation,
        // Templates
        templates::list_templates,
        templates::get_template,
        templates::create_template,
        templates::update_template,
        templates::delete_template,
        templates::apply_template,
    ),
    components(
        schemas(
            crate::models::department::Department,
            crate::models::department::CreateDepartment,
            crate::models::department::UpdateDepartment,
            crate::models::employee::Employee,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::schedule::Schedule,
            crate::models::schedule::CreateSchedule,
            crate::models::schedule::UpdateSchedule,
            crate::models::reservation::EquipmentReservation,
            crate::models::reservation::CreateReservation,
            crate::models::reservation::UpdateReservation,
            crate::models::reservation::ConflictDetails,
            crate::models::reservation::ConflictingReservation,
            crate::models::template::ScheduleTemplate,
            crate::models::template::CreateTemplate,
            crate::models::template::UpdateTemplate,
            crate::models::template::ApplyTemplate,
            crate::models::ordering::MoveDirection,
            crate::models::ordering::MoveRequest,
            crate::models::ordering::OrderItem,
            crate::models::ordering::OrderUpdate,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "departments", description = "Department management"),
        (name = "employees", description = "Employee management"),
        (name = "equipment", description = "Equipment management"),
        (name = "schedules", description = "Employee schedules"),
        (name = "equipment-reservations", description = "Equipment reservations"),
        (name = "templates", description = "Schedule templates")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
