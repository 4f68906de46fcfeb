//! Departments repository

use chrono::Utc;
use sqlx::SqlitePool;

use super::ordering::OrderedTable;
use crate::{
    error::{AppError, AppResult},
    models::{
        department::{CreateDepartment, Department, UpdateDepartment},
        ordering::{MoveDirection, OrderItem},
    },
};

const ORDER: OrderedTable = OrderedTable {
    table: "departments",
    label: "Department",
    scope: None,
};

#[derive(Clone)]
pub struct DepartmentsRepository {
    pool: SqlitePool,
}

impl DepartmentsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List departments in board order
    pub async fn list(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments ORDER BY display_order, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get department by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Department> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    /// Create a department at the end of the list
    pub async fn create(&self, data: &CreateDepartment) -> AppResult<Department> {
        let now = Utc::now();
        let display_order = ORDER.next_order(&self.pool, None).await?;

        let row = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, display_order, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(display_order)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a department
    pub async fn update(&self, id: i64, data: &UpdateDepartment) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = COALESCE(?1, name), updated_at = ?2
            WHERE id = ?3
            RETURNING *
            "#,
        )
        .bind(data.name.as_deref().map(str::trim))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    /// Delete a department
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Department {} not found", id)));
        }
        Ok(())
    }

    /// Number of employees attached to a department
    pub async fn count_employees(&self, id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn move_item(&self, id: i64, direction: MoveDirection) -> AppResult<()> {
        ORDER.move_row(&self.pool, id, direction).await
    }

    pub async fn update_order(&self, items: &[OrderItem]) -> AppResult<()> {
        ORDER.apply_order(&self.pool, items).await
    }
}
