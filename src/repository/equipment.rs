//! Equipment repository for database operations

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow_record::BorrowStatus,
        equipment::{Equipment, MAX_UNITS},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: SqlitePool,
}

impl EquipmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all equipment
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT id, name, total, available FROM equipment ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            "SELECT id, name, total, available FROM equipment WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment with every unit available
    pub async fn create(&self, name: &str, total: i64) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, total, available)
            VALUES (?, ?, ?)
            RETURNING id, name, total, available
            "#,
        )
        .bind(name)
        .bind(total)
        .bind(total)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Move `total` and `available` by the same delta.
    ///
    /// The bounds check is part of the UPDATE, so a rejected adjustment
    /// never touches the row. SQLite turns an overflowing integer sum into
    /// a REAL, hence the `typeof` guard.
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> AppResult<Equipment> {
        let updated = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET total = total + ?1, available = available + ?1
            WHERE id = ?2
              AND typeof(total + ?1) = 'integer'
              AND total + ?1 BETWEEN 0 AND ?3
              AND available + ?1 >= 0
            RETURNING id, name, total, available
            "#,
        )
        .bind(delta)
        .bind(id)
        .bind(MAX_UNITS)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(equipment) => Ok(equipment),
            None => {
                let current = self.get_by_id(id).await?;
                Err(AppError::Validation(format!(
                    "Adjusting '{}' (total={} available={}) by {} would leave stock outside 0..={}",
                    current.name, current.total, current.available, delta, MAX_UNITS
                )))
            }
        }
    }

    /// Delete equipment unless an ACTIVE borrow record references it.
    ///
    /// The loan check and the DELETE are one statement, so a borrow cannot
    /// slip in between. Returns whether a row was removed.
    pub async fn delete_if_not_on_loan(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM equipment
            WHERE id = ?1
              AND NOT EXISTS (
                  SELECT 1 FROM borrow_records
                  WHERE equipment_id = ?1 AND status = ?2
              )
            "#,
        )
        .bind(id)
        .bind(BorrowStatus::Active)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete equipment. Borrow records are left in place.
    ///
    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
