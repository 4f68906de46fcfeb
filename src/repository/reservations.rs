//! Equipment reservations repository

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{
        reservation::{CreateReservation, EquipmentReservation, ReservationQuery, UpdateReservation},
        DEFAULT_COLOR,
    },
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: SqlitePool,
}

impl ReservationsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List reservations intersecting the query window
    pub async fn list(&self, query: &ReservationQuery) -> AppResult<Vec<EquipmentReservation>> {
        let mut conditions = Vec::new();

        if query.equipment_id.is_some() {
            conditions.push("equipment_id = ?");
        }
        if query.start.is_some() {
            conditions.push("end_datetime > ?");
        }
        if query.end.is_some() {
            conditions.push("start_datetime < ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM equipment_reservations {} ORDER BY start_datetime, id",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, EquipmentReservation>(&sql);
        if let Some(equipment_id) = query.equipment_id { builder = builder.bind(equipment_id); }
        if let Some(start) = query.start { builder = builder.bind(start); }
        if let Some(end) = query.end { builder = builder.bind(end); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Reservations of one equipment that may intersect `[start, end)`
    pub async fn list_candidates(
        &self,
        equipment_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<EquipmentReservation>> {
        self.list(&ReservationQuery {
            equipment_id: Some(equipment_id),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        })
        .await
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<EquipmentReservation> {
        sqlx::query_as::<_, EquipmentReservation>("SELECT * FROM equipment_reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Create a reservation
    pub async fn create(&self, data: &CreateReservation) -> AppResult<EquipmentReservation> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, EquipmentReservation>(
            r#"
            INSERT INTO equipment_reservations (equipment_id, title, start_datetime, end_datetime, color, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.title.trim())
        .bind(data.start_datetime)
        .bind(data.end_datetime)
        .bind(data.color.as_deref().unwrap_or(DEFAULT_COLOR))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Reservation"))?;
        Ok(row)
    }

    /// Update a reservation
    pub async fn update(&self, id: i64, data: &UpdateReservation) -> AppResult<EquipmentReservation> {
        let mut sets = vec!["updated_at = ?"];

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(concat!($name, " = ?")); }
            };
        }

        add_f!(data.equipment_id, "equipment_id");
        add_f!(data.title, "title");
        add_f!(data.start_datetime, "start_datetime");
        add_f!(data.end_datetime, "end_datetime");
        add_f!(data.color, "color");

        let query = format!(
            "UPDATE equipment_reservations SET {} WHERE id = ? RETURNING *",
            sets.join(", ")
        );

        let mut builder = sqlx::query_as::<_, EquipmentReservation>(&query).bind(Utc::now());
        if let Some(equipment_id) = data.equipment_id { builder = builder.bind(equipment_id); }
        if let Some(ref title) = data.title { builder = builder.bind(title.trim()); }
        if let Some(start) = data.start_datetime { builder = builder.bind(start); }
        if let Some(end) = data.end_datetime { builder = builder.bind(end); }
        if let Some(ref color) = data.color { builder = builder.bind(color); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Reservation"))?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Delete a reservation
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Reservation {} not found", id)));
        }
        Ok(())
    }
}
