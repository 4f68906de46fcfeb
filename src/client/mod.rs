//! Typed REST client for the board API
//!
//! One resource handle per entity, plus request de-duplication and the
//! polling snapshot loader used by front ends.

mod dedupe;
pub mod poller;

pub use dedupe::RequestDeduper;
pub use poller::{BoardPoller, BoardSnapshot, BoardSource};

use std::marker::PhantomData;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::ErrorResponse,
    models::{
        ordering::{MoveDirection, MoveRequest, OrderItem, OrderUpdate},
        reservation::ConflictDetails,
        template::ApplyTemplate,
        Department, Employee, Equipment, EquipmentReservation, Schedule, ScheduleTemplate,
    },
};

/// Client-side error
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Equipment {} is already reserved in that range", .0.equipment_id)]
    EquipmentConflict(Box<ConflictDetails>),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Error code reported by the server, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            ClientError::EquipmentConflict(_) => Some("EQUIPMENT_CONFLICT"),
            ClientError::NotFound(_) => Some("NOT_FOUND"),
            ClientError::Http(_) => None,
        }
    }

    fn from_body(status: StatusCode, text: &str) -> Self {
        let Ok(body) = serde_json::from_str::<ErrorResponse>(text) else {
            return match status {
                StatusCode::NOT_FOUND => ClientError::NotFound(text.to_string()),
                _ => ClientError::Api {
                    status: status.as_u16(),
                    code: "FAILURE".to_string(),
                    message: text.to_string(),
                },
            };
        };

        match body.error.as_str() {
            "NOT_FOUND" => ClientError::NotFound(body.message),
            "EQUIPMENT_CONFLICT" => {
                match body.details.map(serde_json::from_value::<ConflictDetails>) {
                    Some(Ok(details)) => ClientError::EquipmentConflict(Box::new(details)),
                    _ => ClientError::Api {
                        status: status.as_u16(),
                        code: body.error,
                        message: body.message,
                    },
                }
            }
            _ => ClientError::Api {
                status: status.as_u16(),
                code: body.error,
                message: body.message,
            },
        }
    }
}

/// HTTP client for one board server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` points at the API root, e.g. `http://localhost:8080/api`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn departments(&self) -> Resource<'_, Department> {
        Resource::new(self, "departments")
    }

    pub fn employees(&self) -> Resource<'_, Employee> {
        Resource::new(self, "employees")
    }

    pub fn equipment(&self) -> Resource<'_, Equipment> {
        Resource::new(self, "equipment")
    }

    pub fn schedules(&self) -> Resource<'_, Schedule> {
        Resource::new(self, "schedules")
    }

    pub fn reservations(&self) -> Resource<'_, EquipmentReservation> {
        Resource::new(self, "equipment-reservations")
    }

    pub fn templates(&self) -> Resource<'_, ScheduleTemplate> {
        Resource::new(self, "templates")
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ClientError::from_body(status, &text));
        }
        Ok(response.json().await?)
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut req = self.http.get(self.url(path));
        if let Some(query) = query {
            req = req.query(query);
        }
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.http.delete(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ClientError::from_body(status, &text));
        }
        Ok(())
    }
}

/// Entities kept in a user-defined order
pub trait Ordered {}

impl Ordered for Department {}
impl Ordered for Employee {}
impl Ordered for Equipment {}

/// CRUD handle for one collection endpoint
pub struct Resource<'a, T> {
    api: &'a ApiClient,
    path: &'static str,
    _entity: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> Resource<'a, T> {
    fn new(api: &'a ApiClient, path: &'static str) -> Self {
        Self {
            api,
            path,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> ClientResult<Vec<T>> {
        self.api.get::<_, ()>(self.path, None).await
    }

    /// List with query filters (`ScheduleQuery`, `ReservationQuery`, ...)
    pub async fn list_with<Q: Serialize + ?Sized>(&self, query: &Q) -> ClientResult<Vec<T>> {
        self.api.get(self.path, Some(query)).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<T> {
        self.api
            .get::<_, ()>(&format!("{}/{}", self.path, id), None)
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<T> {
        self.api.post(self.path, body).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> ClientResult<T> {
        self.api.put(&format!("{}/{}", self.path, id), body).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("{}/{}", self.path, id)).await
    }
}

impl<T: DeserializeOwned + Ordered> Resource<'_, T> {
    /// Swap with the neighbour; returns the reordered list
    pub async fn move_item(&self, id: i64, direction: MoveDirection) -> ClientResult<Vec<T>> {
        self.api
            .put(&format!("{}/{}/move", self.path, id), &MoveRequest { direction })
            .await
    }

    pub async fn update_order(&self, items: Vec<OrderItem>) -> ClientResult<Vec<T>> {
        self.api
            .put(&format!("{}/order/update", self.path), &OrderUpdate { items })
            .await
    }
}

impl Resource<'_, ScheduleTemplate> {
    /// Create a schedule for `employee_id` on `date` (`YYYY-MM-DD`) from a template
    pub async fn apply(&self, id: i64, employee_id: i64, date: &str) -> ClientResult<Schedule> {
        let body = ApplyTemplate {
            employee_id,
            date: date.to_string(),
        };
        self.api
            .post(&format!("{}/{}/apply", self.path, id), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_conflict_body_maps_to_conflict_error() {
        let start = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 10, 10, 0, 0).unwrap();
        let body = serde_json::json!({
            "code": 6,
            "error": "EQUIPMENT_CONFLICT",
            "message": "Equipment 3 is already reserved",
            "details": {
                "equipment_id": 3,
                "requested_start": start,
                "requested_end": end,
                "conflicts": [{
                    "id": 7,
                    "title": "Survey",
                    "start_datetime": start,
                    "end_datetime": end
                }]
            }
        });

        let err = ClientError::from_body(StatusCode::CONFLICT, &body.to_string());
        match err {
            ClientError::EquipmentConflict(details) => {
                assert_eq!(details.equipment_id, 3);
                assert_eq!(details.conflicts.len(), 1);
                assert_eq!(details.conflicts[0].id, 7);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_body_mapping() {
        let body = r#"{"code":3,"error":"NOT_FOUND","message":"Schedule 9 not found"}"#;
        assert!(matches!(
            ClientError::from_body(StatusCode::NOT_FOUND, body),
            ClientError::NotFound(msg) if msg == "Schedule 9 not found"
        ));

        let body = r#"{"code":5,"error":"DUPLICATE","message":"Employee already exists"}"#;
        let err = ClientError::from_body(StatusCode::CONFLICT, body);
        assert_eq!(err.code(), Some("DUPLICATE"));
        assert!(matches!(err, ClientError::Api { status: 409, .. }));

        let err = ClientError::from_body(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, ClientError::Api { status: 502, ref code, .. } if code == "FAILURE"));
    }
}
