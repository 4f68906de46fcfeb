//! Schedule templates repository

use chrono::{NaiveTime, Utc};
use sqlx::SqlitePool;

use super::ordering::OrderedTable;
use crate::{
    error::{AppError, AppResult},
    models::template::ScheduleTemplate,
};

const ORDER: OrderedTable = OrderedTable {
    table: "schedule_templates",
    label: "Template",
    scope: None,
};

/// Parsed template fields ready for storage
#[derive(Debug, Clone)]
pub struct TemplateRecord {
    pub name: String,
    pub title: String,
    pub color: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Clone)]
pub struct TemplatesRepository {
    pool: SqlitePool,
}

impl TemplatesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<ScheduleTemplate>> {
        let rows = sqlx::query_as::<_, ScheduleTemplate>(
            "SELECT * FROM schedule_templates ORDER BY display_order, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ScheduleTemplate> {
        sqlx::query_as::<_, ScheduleTemplate>("SELECT * FROM schedule_templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Template {} not found", id)))
    }

    pub async fn create(&self, record: &TemplateRecord) -> AppResult<ScheduleTemplate> {
        let now = Utc::now();
        let display_order = ORDER.next_order(&self.pool, None).await?;

        let row = sqlx::query_as::<_, ScheduleTemplate>(
            r#"
            INSERT INTO schedule_templates (name, title, color, start_time, end_time, display_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&record.name)
        .bind(&record.title)
        .bind(&record.color)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(display_order)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite a template with fully merged fields
    pub async fn update(&self, id: i64, record: &TemplateRecord) -> AppResult<ScheduleTemplate> {
        sqlx::query_as::<_, ScheduleTemplate>(
            r#"
            UPDATE schedule_templates
            SET name = ?, title = ?, color = ?, start_time = ?, end_time = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&record.name)
        .bind(&record.title)
        .bind(&record.color)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {} not found", id)))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM schedule_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Template {} not found", id)));
        }
        Ok(())
    }
}
