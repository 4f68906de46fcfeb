//! REST client integration tests against a live server on an ephemeral port

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use planboard_server::{
    client::{ApiClient, BoardPoller, ClientError},
    config::{AppConfig, BoardConfig},
    create_router,
    models::{
        department::CreateDepartment,
        employee::CreateEmployee,
        equipment::CreateEquipment,
        ordering::{MoveDirection, OrderItem},
        reservation::{CreateReservation, ReservationQuery, UpdateReservation},
        schedule::{CreateSchedule, ScheduleQuery},
        template::CreateTemplate,
    },
    AppState,
};

/// Start a server on 127.0.0.1:0 and return a client pointed at it
async fn spawn_server() -> ApiClient {
    let mut config = AppConfig::default();
    config.database.url = "sqlite::memory:".to_string();
    let state = AppState::build(config)
        .await
        .expect("Failed to build application state");
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    ApiClient::new(&format!("http://{}/api", addr)).expect("Failed to build client")
}

fn may(day: u32, hour: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

#[tokio::test]
async fn test_client_crud_and_ordering() {
    let client = spawn_server().await;

    let field = client
        .departments()
        .create(&CreateDepartment { name: "Field".to_string() })
        .await
        .unwrap();
    let office = client
        .departments()
        .create(&CreateDepartment { name: "Office".to_string() })
        .await
        .unwrap();

    let reordered = client
        .departments()
        .move_item(office.id, MoveDirection::Up)
        .await
        .unwrap();
    assert_eq!(reordered[0].id, office.id);
    assert_eq!(reordered[1].id, field.id);

    let reordered = client
        .departments()
        .update_order(vec![
            OrderItem { id: field.id, display_order: 0 },
            OrderItem { id: office.id, display_order: 1 },
        ])
        .await
        .unwrap();
    assert_eq!(reordered[0].id, field.id);

    let employee = client
        .employees()
        .create(&CreateEmployee {
            employee_number: "E-001".to_string(),
            name: "Alice".to_string(),
            department_id: field.id,
        })
        .await
        .unwrap();
    assert_eq!(client.employees().get(employee.id).await.unwrap(), employee);

    let err = client
        .departments()
        .delete(field.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("DEPARTMENT_NOT_EMPTY"));

    client.departments().delete(office.id).await.unwrap();
    assert!(matches!(
        client.departments().get(office.id).await,
        Err(ClientError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_client_equipment_conflict() {
    let client = spawn_server().await;
    let drone = client
        .equipment()
        .create(&CreateEquipment { name: "Drone".to_string(), description: None })
        .await
        .unwrap();

    let booked = client
        .reservations()
        .create(&CreateReservation {
            equipment_id: drone.id,
            title: "Survey".to_string(),
            start_datetime: may(10, 9),
            end_datetime: may(10, 12),
            color: None,
        })
        .await
        .unwrap();

    let err = client
        .reservations()
        .create(&CreateReservation {
            equipment_id: drone.id,
            title: "Clash".to_string(),
            start_datetime: may(10, 11),
            end_datetime: may(10, 13),
            color: None,
        })
        .await
        .unwrap_err();
    match err {
        ClientError::EquipmentConflict(details) => {
            assert_eq!(details.equipment_id, drone.id);
            assert_eq!(details.conflicts[0].id, booked.id);
        }
        other => panic!("expected conflict, got {:?}", other),
    }

    let moved = client
        .reservations()
        .update(
            booked.id,
            &UpdateReservation {
                start_datetime: Some(may(11, 9)),
                end_datetime: Some(may(11, 12)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.start_datetime, may(11, 9));

    let listed = client
        .reservations()
        .list_with(&ReservationQuery {
            equipment_id: Some(drone.id),
            year: Some(2024),
            month: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_client_template_apply() {
    let client = spawn_server().await;
    let department = client
        .departments()
        .create(&CreateDepartment { name: "Field".to_string() })
        .await
        .unwrap();
    let employee = client
        .employees()
        .create(&CreateEmployee {
            employee_number: "E-001".to_string(),
            name: "Alice".to_string(),
            department_id: department.id,
        })
        .await
        .unwrap();
    let template = client
        .templates()
        .create(&CreateTemplate {
            name: "Morning".to_string(),
            title: "Morning shift".to_string(),
            color: None,
            start_time: "08:00".to_string(),
            end_time: "12:30".to_string(),
        })
        .await
        .unwrap();

    let schedule = client
        .templates()
        .apply(template.id, employee.id, "2024-05-10")
        .await
        .unwrap();
    assert_eq!(schedule.employee_id, employee.id);
    assert_eq!(schedule.start_datetime, may(10, 8));
    assert_eq!(
        schedule.end_datetime,
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 30, 0).unwrap()
    );

    let listed = client
        .schedules()
        .list_with(&ScheduleQuery {
            employee_id: Some(employee.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed, vec![schedule]);
}

#[tokio::test]
async fn test_poller_against_live_server() {
    let client = spawn_server().await;
    let department = client
        .departments()
        .create(&CreateDepartment { name: "Field".to_string() })
        .await
        .unwrap();
    let employee = client
        .employees()
        .create(&CreateEmployee {
            employee_number: "E-001".to_string(),
            name: "Alice".to_string(),
            department_id: department.id,
        })
        .await
        .unwrap();
    for (start, end) in [(9, 11), (10, 12)] {
        client
            .schedules()
            .create(&CreateSchedule {
                employee_id: employee.id,
                title: "Job".to_string(),
                start_datetime: may(10, start),
                end_datetime: may(10, end),
                color: None,
            })
            .await
            .unwrap();
    }

    let poller =
        Arc::new(BoardPoller::from_config(client.clone(), &BoardConfig::default()).with_month(2024, 5));
    assert!(poller.refresh().await.unwrap());
    let first = poller.snapshot();
    assert_eq!(first.employees.len(), 1);
    assert_eq!(first.schedules.len(), 2);
    assert_eq!(first.schedule_overlaps.len(), 2);

    // Nothing changed: same snapshot instance
    assert!(!poller.refresh().await.unwrap());
    assert!(Arc::ptr_eq(&first, &poller.snapshot()));

    client
        .equipment()
        .create(&CreateEquipment { name: "Van".to_string(), description: None })
        .await
        .unwrap();
    assert!(poller.refresh().await.unwrap());
    assert_eq!(poller.snapshot().equipment.len(), 1);
    assert_ne!(poller.snapshot().signature, first.signature);
}
