//! API integration tests
//!
//! Every test runs the full router against its own in-memory SQLite database.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use planboard_server::{config::AppConfig, create_router, AppState};

async fn test_app() -> Router {
    let mut config = AppConfig::default();
    config.database.url = "sqlite::memory:".to_string();
    let state = AppState::build(config)
        .await
        .expect("Failed to build application state");
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response is not JSON")
    };
    (status, value)
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, value) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} failed: {}", uri, value);
    value
}

async fn seed_employee(app: &Router, number: &str) -> (i64, i64) {
    let department = create(app, "/api/departments", json!({ "name": "Field" })).await;
    let employee = create(
        app,
        "/api/employees",
        json!({
            "employee_number": number,
            "name": "Alice",
            "department_id": department["id"]
        }),
    )
    .await;
    (department["id"].as_i64().unwrap(), employee["id"].as_i64().unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_openapi_document() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/equipment-reservations"].is_object());
}

#[tokio::test]
async fn test_department_crud() {
    let app = test_app().await;

    let created = create(&app, "/api/departments", json!({ "name": "  Survey  " })).await;
    assert_eq!(created["name"], "Survey");
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/departments/{}", id),
        Some(json!({ "name": "Surveying" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Surveying");

    let (status, body) = send(&app, Method::GET, "/api/departments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/departments/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/departments/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_department_with_employees_cannot_be_deleted() {
    let app = test_app().await;
    let (department_id, employee_id) = seed_employee(&app, "E-001").await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/departments/{}", department_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DEPARTMENT_NOT_EMPTY");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/employees/{}", employee_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/departments/{}", department_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_duplicate_employee_number() {
    let app = test_app().await;
    let (department_id, _) = seed_employee(&app, "E-001").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({
            "employee_number": "E-001",
            "name": "Bob",
            "department_id": department_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DUPLICATE");
}

#[tokio::test]
async fn test_employee_requires_existing_department() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({ "employee_number": "E-9", "name": "Nobody", "department_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_move_and_reorder_equipment() {
    let app = test_app().await;
    let a = create(&app, "/api/equipment", json!({ "name": "Drone" })).await;
    let b = create(&app, "/api/equipment", json!({ "name": "Van", "description": "7 seats" })).await;
    let c = create(&app, "/api/equipment", json!({ "name": "Laser" })).await;
    let names = |body: &Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/equipment/{}/move", c["id"]),
        Some(json!({ "direction": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Drone", "Laser", "Van"]);

    // Moving the first row further up changes nothing
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/equipment/{}/move", a["id"]),
        Some(json!({ "direction": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Drone", "Laser", "Van"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/equipment/order/update",
        Some(json!({
            "items": [
                { "id": b["id"], "display_order": 0 },
                { "id": c["id"], "display_order": 1 },
                { "id": a["id"], "display_order": 2 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Van", "Laser", "Drone"]);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/equipment/order/update",
        Some(json!({ "items": [{ "id": 999, "display_order": 0 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_employees_within_department() {
    let app = test_app().await;
    let field = create(&app, "/api/departments", json!({ "name": "Field" })).await;
    let office = create(&app, "/api/departments", json!({ "name": "Office" })).await;

    let mut ids = Vec::new();
    for (number, department) in [("E1", &field), ("E2", &field), ("E3", &office), ("E4", &office)] {
        let employee = create(
            &app,
            "/api/employees",
            json!({ "employee_number": number, "name": number, "department_id": department["id"] }),
        )
        .await;
        ids.push(employee["id"].as_i64().unwrap());
    }
    let numbers = |body: &Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|e| e["employee_number"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/employees/{}/move", ids[1]),
        Some(json!({ "direction": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(numbers(&body), vec!["E2", "E1", "E3", "E4"]);

    // First of its department: does not jump into the previous department
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/employees/{}/move", ids[2]),
        Some(json!({ "direction": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(numbers(&body), vec!["E2", "E1", "E3", "E4"]);

    let (status, moved) = send(
        &app,
        Method::PUT,
        &format!("/api/employees/{}", ids[0]),
        Some(json!({ "department_id": office["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["department_id"], office["id"]);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/employees?department_id={}", office["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(numbers(&body), vec!["E3", "E4", "E1"]);
    assert!(moved["display_order"].as_i64() > body[1]["display_order"].as_i64());
}

#[tokio::test]
async fn test_blank_text_is_rejected() {
    let app = test_app().await;
    let (_, employee_id) = seed_employee(&app, "E-001").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/schedules",
        Some(json!({
            "employee_id": employee_id,
            "title": "   ",
            "start_datetime": "2024-05-10T09:00:00Z",
            "end_datetime": "2024-05-10T10:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_VALUE");

    let (status, body) = send(&app, Method::POST, "/api/departments", Some(json!({ "name": " \t " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_VALUE");

    let schedule = create(
        &app,
        "/api/schedules",
        json!({
            "employee_id": employee_id,
            "title": "Survey",
            "start_datetime": "2024-05-10T09:00:00Z",
            "end_datetime": "2024-05-10T10:00:00Z"
        }),
    )
    .await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/schedules/{}", schedule["id"]),
        Some(json!({ "title": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_interval_validation() {
    let app = test_app().await;
    let (_, employee_id) = seed_employee(&app, "E-001").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/schedules",
        Some(json!({
            "employee_id": employee_id,
            "title": "Backwards",
            "start_datetime": "2024-05-10T10:00:00Z",
            "end_datetime": "2024-05-10T09:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_VALUE");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/schedules",
        Some(json!({
            "employee_id": employee_id,
            "title": "Bad color",
            "start_datetime": "2024-05-10T09:00:00Z",
            "end_datetime": "2024-05-10T10:00:00Z",
            "color": "blue"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedules_may_overlap_and_filter_by_month() {
    let app = test_app().await;
    let (department_id, employee_id) = seed_employee(&app, "E-001").await;

    let first = create(
        &app,
        "/api/schedules",
        json!({
            "employee_id": employee_id,
            "title": "Site visit",
            "start_datetime": "2024-05-10T11:00:00+02:00",
            "end_datetime": "2024-05-10T13:00:00+02:00"
        }),
    )
    .await;
    // Stored in UTC
    assert_eq!(first["start_datetime"], "2024-05-10T09:00:00Z");
    assert_eq!(first["color"], "#3b82f6");

    // Employees are allowed to double-book themselves
    create(
        &app,
        "/api/schedules",
        json!({
            "employee_id": employee_id,
            "title": "Call",
            "start_datetime": "2024-05-10T10:00:00Z",
            "end_datetime": "2024-05-10T10:30:00Z"
        }),
    )
    .await;
    create(
        &app,
        "/api/schedules",
        json!({
            "employee_id": employee_id,
            "title": "June job",
            "start_datetime": "2024-06-03T08:00:00Z",
            "end_datetime": "2024-06-03T12:00:00Z"
        }),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/schedules?year=2024&month=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/schedules?department_id={}&year=2024&month=6", department_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "June job");

    let (status, _) = send(&app, Method::GET, "/api/schedules?year=2024", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_partial_update() {
    let app = test_app().await;
    let (_, employee_id) = seed_employee(&app, "E-001").await;
    let schedule = create(
        &app,
        "/api/schedules",
        json!({
            "employee_id": employee_id,
            "title": "Inspection",
            "start_datetime": "2024-05-10T09:00:00Z",
            "end_datetime": "2024-05-10T10:00:00Z"
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/schedules/{}", schedule["id"]),
        Some(json!({ "end_datetime": "2024-05-10T11:15:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Inspection");
    assert_eq!(body["start_datetime"], "2024-05-10T09:00:00Z");
    assert_eq!(body["end_datetime"], "2024-05-10T11:15:00Z");

    // Moving the end before the stored start is rejected
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/schedules/{}", schedule["id"]),
        Some(json!({ "end_datetime": "2024-05-10T08:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_employee_removes_schedules() {
    let app = test_app().await;
    let (_, employee_id) = seed_employee(&app, "E-001").await;
    let schedule = create(
        &app,
        "/api/schedules",
        json!({
            "employee_id": employee_id,
            "title": "Inspection",
            "start_datetime": "2024-05-10T09:00:00Z",
            "end_datetime": "2024-05-10T10:00:00Z"
        }),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/employees/{}", employee_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/schedules/{}", schedule["id"]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_equipment_conflict() {
    let app = test_app().await;
    let drone = create(&app, "/api/equipment", json!({ "name": "Drone" })).await;
    let van = create(&app, "/api/equipment", json!({ "name": "Van" })).await;

    let first = create(
        &app,
        "/api/equipment-reservations",
        json!({
            "equipment_id": drone["id"],
            "title": "Survey",
            "start_datetime": "2024-05-10T09:00:00Z",
            "end_datetime": "2024-05-10T12:00:00Z"
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/equipment-reservations",
        Some(json!({
            "equipment_id": drone["id"],
            "title": "Inspection",
            "start_datetime": "2024-05-10T11:00:00Z",
            "end_datetime": "2024-05-10T13:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "EQUIPMENT_CONFLICT");
    assert_eq!(body["details"]["equipment_id"], drone["id"]);
    assert_eq!(body["details"]["conflicts"][0]["id"], first["id"]);

    // Same range on other equipment is fine
    create(
        &app,
        "/api/equipment-reservations",
        json!({
            "equipment_id": van["id"],
            "title": "Inspection",
            "start_datetime": "2024-05-10T11:00:00Z",
            "end_datetime": "2024-05-10T13:00:00Z"
        }),
    )
    .await;

    // Touching intervals do not conflict
    let second = create(
        &app,
        "/api/equipment-reservations",
        json!({
            "equipment_id": drone["id"],
            "title": "Afternoon",
            "start_datetime": "2024-05-10T12:00:00Z",
            "end_datetime": "2024-05-10T14:00:00Z"
        }),
    )
    .await;

    // Updating a reservation over its own range is not a conflict
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/equipment-reservations/{}", first["id"]),
        Some(json!({ "start_datetime": "2024-05-10T08:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_datetime"], "2024-05-10T08:00:00Z");

    // ...but stretching it into the next one is
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/equipment-reservations/{}", first["id"]),
        Some(json!({ "end_datetime": "2024-05-10T12:30:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"]["conflicts"][0]["id"], second["id"]);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/equipment-reservations?equipment_id={}", drone["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleting_equipment_removes_reservations() {
    let app = test_app().await;
    let drone = create(&app, "/api/equipment", json!({ "name": "Drone" })).await;
    let reservation = create(
        &app,
        "/api/equipment-reservations",
        json!({
            "equipment_id": drone["id"],
            "title": "Survey",
            "start_datetime": "2024-05-10T09:00:00Z",
            "end_datetime": "2024-05-10T12:00:00Z"
        }),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/equipment/{}", drone["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/equipment-reservations/{}", reservation["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_apply_template() {
    let app = test_app().await;
    let (_, employee_id) = seed_employee(&app, "E-001").await;

    let template = create(
        &app,
        "/api/templates",
        json!({
            "name": "Night shift",
            "title": "Night",
            "color": "#111827",
            "start_time": "22:00",
            "end_time": "06:00"
        }),
    )
    .await;

    let schedule = create(
        &app,
        &format!("/api/templates/{}/apply", template["id"]),
        json!({ "employee_id": employee_id, "date": "2024-05-10" }),
    )
    .await;
    assert_eq!(schedule["title"], "Night");
    assert_eq!(schedule["color"], "#111827");
    assert_eq!(schedule["start_datetime"], "2024-05-10T22:00:00Z");
    assert_eq!(schedule["end_datetime"], "2024-05-11T06:00:00Z");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/templates/{}/apply", template["id"]),
        Some(json!({ "employee_id": employee_id, "date": "10/05/2024" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/templates",
        Some(json!({
            "name": "Broken",
            "title": "Broken",
            "start_time": "9am",
            "end_time": "17:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
