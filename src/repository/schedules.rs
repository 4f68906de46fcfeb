//! Schedules repository (employee time blocks)

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{
        schedule::{CreateSchedule, Schedule, ScheduleQuery, UpdateSchedule},
        DEFAULT_COLOR,
    },
};

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: SqlitePool,
}

impl SchedulesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List schedules intersecting the query window
    ///
    /// `year`/`month` are ignored here; the service resolves them into
    /// `start`/`end` beforehand.
    pub async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<Schedule>> {
        let mut conditions = Vec::new();

        if query.employee_id.is_some() {
            conditions.push("employee_id = ?");
        }
        if query.department_id.is_some() {
            conditions.push("employee_id IN (SELECT id FROM employees WHERE department_id = ?)");
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
            "SELECT * FROM schedules {} ORDER BY start_datetime, id",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, Schedule>(&sql);
        if let Some(employee_id) = query.employee_id { builder = builder.bind(employee_id); }
        if let Some(department_id) = query.department_id { builder = builder.bind(department_id); }
        if let Some(start) = query.start { builder = builder.bind(start); }
        if let Some(end) = query.end { builder = builder.bind(end); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get schedule by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }

    /// Create a schedule
    pub async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (employee_id, title, start_datetime, end_datetime, color, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(data.employee_id)
        .bind(data.title.trim())
        .bind(data.start_datetime)
        .bind(data.end_datetime)
        .bind(data.color.as_deref().unwrap_or(DEFAULT_COLOR))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Schedule"))?;
        Ok(row)
    }

    /// Update a schedule
    pub async fn update(&self, id: i64, data: &UpdateSchedule) -> AppResult<Schedule> {
        let mut sets = vec!["updated_at = ?"];

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(concat!($name, " = ?")); }
            };
        }

        add_f!(data.employee_id, "employee_id");
        add_f!(data.title, "title");
        add_f!(data.start_datetime, "start_datetime");
        add_f!(data.end_datetime, "end_datetime");
        add_f!(data.color, "color");

        let query = format!("UPDATE schedules SET {} WHERE id = ? RETURNING *", sets.join(", "));

        let mut builder = sqlx::query_as::<_, Schedule>(&query).bind(Utc::now());
        if let Some(employee_id) = data.employee_id { builder = builder.bind(employee_id); }
        if let Some(ref title) = data.title { builder = builder.bind(title.trim()); }
        if let Some(start) = data.start_datetime { builder = builder.bind(start); }
        if let Some(end) = data.end_datetime { builder = builder.bind(end); }
        if let Some(ref color) = data.color { builder = builder.bind(color); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Schedule"))?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }

    /// Delete a schedule
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Schedule {} not found", id)));
        }
        Ok(())
    }
}
