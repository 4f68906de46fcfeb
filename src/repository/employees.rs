//! Employees repository

use chrono::Utc;
use sqlx::SqlitePool;

use super::ordering::OrderedTable;
use crate::{
    error::{AppError, AppResult},
    models::{
        employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee},
        ordering::{MoveDirection, OrderItem},
    },
};

const ORDER: OrderedTable = OrderedTable {
    table: "employees",
    label: "Employee",
    scope: Some("department_id"),
};

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: SqlitePool,
}

impl EmployeesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List employees grouped by department order, then employee order
    pub async fn list(&self, query: &EmployeeQuery) -> AppResult<Vec<Employee>> {
        let mut sql = String::from(
            r#"
            SELECT e.* FROM employees e
            JOIN departments d ON d.id = e.department_id
            "#,
        );
        if query.department_id.is_some() {
            sql.push_str(" WHERE e.department_id = ?");
        }
        sql.push_str(" ORDER BY d.display_order, d.id, e.display_order, e.id");

        let mut builder = sqlx::query_as::<_, Employee>(&sql);
        if let Some(department_id) = query.department_id {
            builder = builder.bind(department_id);
        }
        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get employee by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    /// Create an employee at the end of their department
    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        let now = Utc::now();
        let display_order = ORDER.next_order(&self.pool, Some(data.department_id)).await?;

        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (employee_number, name, department_id, display_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(data.employee_number.trim())
        .bind(data.name.trim())
        .bind(data.department_id)
        .bind(display_order)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Employee number"))
    }

    /// Update an employee. Changing department appends them to the new one.
    pub async fn update(&self, id: i64, data: &UpdateEmployee) -> AppResult<Employee> {
        let current = self.get_by_id(id).await?;
        let display_order = match data.department_id {
            Some(department_id) if department_id != current.department_id => {
                ORDER.next_order(&self.pool, Some(department_id)).await?
            }
            _ => current.display_order,
        };

        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET employee_number = COALESCE(?1, employee_number),
                name = COALESCE(?2, name),
                department_id = COALESCE(?3, department_id),
                display_order = ?4,
                updated_at = ?5
            WHERE id = ?6
            RETURNING *
            "#,
        )
        .bind(data.employee_number.as_deref().map(str::trim))
        .bind(data.name.as_deref().map(str::trim))
        .bind(data.department_id)
        .bind(display_order)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Employee number"))?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    /// Delete an employee (cascade deletes schedules)
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
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
