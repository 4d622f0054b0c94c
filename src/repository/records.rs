//! Borrow records repository for database operations
//!
//! Borrow and return each touch two tables. Both run inside one
//! transaction so the stock counter and the record never disagree.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow_record::{BorrowRecord, BorrowRecordDetails, BorrowStatus},
        equipment::Equipment,
    },
};

const DETAILS_QUERY: &str = r#"
    SELECT r.id, r.user_name, r.equipment_id, r.borrow_date, r.return_date, r.status,
           e.id AS eq_id, e.name AS eq_name, e.total AS eq_total, e.available AS eq_available
    FROM borrow_records r
    LEFT JOIN equipment e ON e.id = r.equipment_id
"#;

#[derive(Clone)]
pub struct RecordsRepository {
    pool: SqlitePool,
}

impl RecordsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a record by ID, `None` if it does not exist
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<BorrowRecord>> {
        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            SELECT id, user_name, equipment_id, borrow_date, return_date, status
            FROM borrow_records WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// List records, newest borrow first, joined with their equipment
    pub async fn list(&self, status: Option<BorrowStatus>) -> AppResult<Vec<BorrowRecordDetails>> {
        let rows = match status {
            Some(status) => {
                let query = format!(
                    "{} WHERE r.status = ? ORDER BY r.borrow_date DESC, r.id DESC",
                    DETAILS_QUERY
                );
                sqlx::query(&query).bind(status).fetch_all(&self.pool).await?
            }
            None => {
                let query = format!("{} ORDER BY r.borrow_date DESC, r.id DESC", DETAILS_QUERY);
                sqlx::query(&query).fetch_all(&self.pool).await?
            }
        };

        rows.iter().map(details_from_row).collect()
    }

    /// Take one unit of `equipment_id` and open a record for `user_name`.
    ///
    /// The availability check is the `available > 0` guard of the UPDATE
    /// itself, so two borrowers racing for the last unit cannot both win.
    pub async fn borrow(&self, user_name: &str, equipment_id: i64) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let taken = sqlx::query(
            "UPDATE equipment SET available = available - 1 WHERE id = ? AND available > 0",
        )
        .bind(equipment_id)
        .execute(&mut *tx)
        .await?;

        if taken.rows_affected() == 0 {
            let name: Option<String> = sqlx::query_scalar("SELECT name FROM equipment WHERE id = ?")
                .bind(equipment_id)
                .fetch_optional(&mut *tx)
                .await?;
            tx.rollback().await?;

            return Err(AppError::OutOfStock(match name {
                Some(name) => format!("No unit of '{}' is available", name),
                None => format!("Equipment {} does not exist", equipment_id),
            }));
        }

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (user_name, equipment_id, borrow_date, status)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_name, equipment_id, borrow_date, return_date, status
            "#,
        )
        .bind(user_name)
        .bind(equipment_id)
        .bind(Utc::now())
        .bind(BorrowStatus::Active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Close an ACTIVE record and give its unit back.
    ///
    /// Returns `None` when there was nothing to do: the record is missing,
    /// already returned, or was returned concurrently.
    pub async fn return_record(&self, record_id: i64) -> AppResult<Option<BorrowRecord>> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            UPDATE borrow_records
            SET status = ?, return_date = ?
            WHERE id = ? AND status = ?
            RETURNING id, user_name, equipment_id, borrow_date, return_date, status
            "#,
        )
        .bind(BorrowStatus::Returned)
        .bind(Utc::now())
        .bind(record_id)
        .bind(BorrowStatus::Active)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(record) = record else {
            tx.rollback().await?;
            return Ok(None);
        };

        // Clamped: a history clear may already have lost track of this unit.
        // A deleted equipment row simply matches nothing.
        sqlx::query("UPDATE equipment SET available = MIN(available + 1, total) WHERE id = ?")
            .bind(record.equipment_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(record))
    }

    /// Delete every record regardless of status.
    ///
    /// With `reconcile`, units held by ACTIVE records are put back in stock
    /// first, in the same transaction.
    pub async fn clear(&self, reconcile: bool) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        if reconcile {
            sqlx::query(
                r#"
                UPDATE equipment
                SET available = MIN(
                    total,
                    available + (
                        SELECT COUNT(*) FROM borrow_records r
                        WHERE r.equipment_id = equipment.id AND r.status = ?1
                    )
                )
                WHERE id IN (SELECT equipment_id FROM borrow_records WHERE status = ?1)
                "#,
            )
            .bind(BorrowStatus::Active)
            .execute(&mut *tx)
            .await?;
        }

        let deleted = sqlx::query("DELETE FROM borrow_records")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted)
    }

    /// Count ACTIVE records
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records WHERE status = ?")
            .bind(BorrowStatus::Active)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count ACTIVE records referencing one equipment
    pub async fn count_active_for_equipment(&self, equipment_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrow_records WHERE equipment_id = ? AND status = ?",
        )
        .bind(equipment_id)
        .bind(BorrowStatus::Active)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

fn details_from_row(row: &SqliteRow) -> AppResult<BorrowRecordDetails> {
    let equipment = match row.try_get::<Option<i64>, _>("eq_id")? {
        Some(id) => Some(Equipment {
            id,
            name: row.try_get("eq_name")?,
            total: row.try_get("eq_total")?,
            available: row.try_get("eq_available")?,
        }),
        None => None,
    };

    Ok(BorrowRecordDetails {
        id: row.try_get("id")?,
        user_name: row.try_get("user_name")?,
        equipment_id: row.try_get("equipment_id")?,
        borrow_date: row.try_get("borrow_date")?,
        return_date: row.try_get("return_date")?,
        status: row.try_get("status")?,
        equipment,
    })
}
