//! Display-order maintenance shared by ordered tables

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::{
    error::{AppError, AppResult},
    models::ordering::{MoveDirection, OrderItem},
};

/// A table whose rows carry a `display_order`, optionally scoped by a
/// parent column (employees are ordered inside their department)
pub(super) struct OrderedTable {
    pub table: &'static str,
    pub label: &'static str,
    pub scope: Option<&'static str>,
}

impl OrderedTable {
    /// Order value that appends a row at the end of its scope
    pub async fn next_order<'e>(
        &self,
        executor: impl SqliteExecutor<'e>,
        scope_value: Option<i64>,
    ) -> AppResult<i64> {
        let next = match (self.scope, scope_value) {
            (Some(column), Some(value)) => {
                let sql = format!(
                    "SELECT COALESCE(MAX(display_order), -1) + 1 FROM {} WHERE {} = ?",
                    self.table, column
                );
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(value)
                    .fetch_one(executor)
                    .await?
            }
            _ => {
                let sql = format!(
                    "SELECT COALESCE(MAX(display_order), -1) + 1 FROM {}",
                    self.table
                );
                sqlx::query_scalar::<_, i64>(&sql).fetch_one(executor).await?
            }
        };
        Ok(next)
    }

    /// Swap a row with its neighbour and renumber its scope densely.
    ///
    /// Moving the first row up or the last row down is a no-op.
    pub async fn move_row(&self, pool: &SqlitePool, id: i64, direction: MoveDirection) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        let scope_value: Option<i64> = match self.scope {
            Some(column) => {
                let sql = format!("SELECT {} FROM {} WHERE id = ?", column, self.table);
                let value = sqlx::query_scalar::<_, i64>(&sql)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| self.not_found(id))?;
                Some(value)
            }
            None => None,
        };

        let mut ids: Vec<i64> = match (self.scope, scope_value) {
            (Some(column), Some(value)) => {
                let sql = format!(
                    "SELECT id FROM {} WHERE {} = ? ORDER BY display_order, id",
                    self.table, column
                );
                sqlx::query_scalar(&sql).bind(value).fetch_all(&mut *tx).await?
            }
            _ => {
                let sql = format!("SELECT id FROM {} ORDER BY display_order, id", self.table);
                sqlx::query_scalar(&sql).fetch_all(&mut *tx).await?
            }
        };

        let pos = ids
            .iter()
            .position(|&row| row == id)
            .ok_or_else(|| self.not_found(id))?;
        let target = match direction {
            MoveDirection::Up => pos.checked_sub(1),
            MoveDirection::Down => Some(pos + 1).filter(|&t| t < ids.len()),
        };
        let Some(target) = target else {
            return Ok(());
        };
        ids.swap(pos, target);

        let now = Utc::now();
        let sql = format!(
            "UPDATE {} SET display_order = ?, updated_at = ? WHERE id = ?",
            self.table
        );
        for (order, row) in ids.iter().enumerate() {
            sqlx::query(&sql)
                .bind(order as i64)
                .bind(now)
                .bind(*row)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::debug!("Moved {} {} {:?}", self.label, id, direction);
        Ok(())
    }

    /// Apply explicit order values. Fails as a whole if any id is unknown.
    pub async fn apply_order(&self, pool: &SqlitePool, items: &[OrderItem]) -> AppResult<()> {
        let mut tx = pool.begin().await?;
        let now = Utc::now();
        let sql = format!(
            "UPDATE {} SET display_order = ?, updated_at = ? WHERE id = ?",
            self.table
        );

        for item in items {
            let result = sqlx::query(&sql)
                .bind(item.display_order)
                .bind(now)
                .bind(item.id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(self.not_found(item.id));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    fn not_found(&self, id: i64) -> AppError {
        AppError::NotFound(format!("{} {} not found", self.label, id))
    }
}
