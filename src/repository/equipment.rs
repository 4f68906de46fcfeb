//! Equipment repository

use chrono::Utc;
use sqlx::SqlitePool;

use super::ordering::OrderedTable;
use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        ordering::{MoveDirection, OrderItem},
    },
};

const ORDER: OrderedTable = OrderedTable {
    table: "equipment",
    label: "Equipment",
    scope: None,
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: SqlitePool,
}

impl EquipmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all equipment in board order
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment ORDER BY display_order, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment at the end of the list
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let now = Utc::now();
        let display_order = ORDER.next_order(&self.pool, None).await?;

        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, description, display_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(&data.description)
        .bind(display_order)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment
    pub async fn update(&self, id: i64, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = vec!["updated_at = ?"];

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(concat!($name, " = ?"));
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.description, "description");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ? RETURNING *",
            sets.join(", ")
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val.trim());
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.description);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment (cascade deletes reservations)
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    pub async fn move_item(&self, id: i64, direction: MoveDirection) -> AppResult<()> {
        ORDER.move_row(&self.pool, id, direction).await
    }

    pub async fn update_order(&self, items: &[OrderItem]) -> AppResult<()> {
        ORDER.apply_order(&self.pool, items).await
    }
}
