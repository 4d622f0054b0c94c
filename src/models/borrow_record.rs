//! Borrow record model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::equipment::Equipment;

/// Lifecycle of a borrow record. `Active -> Returned` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorrowStatus {
    Active,
    Returned,
}

impl BorrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Active => "ACTIVE",
            BorrowStatus::Returned => "RETURNED",
        }
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrow record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: i64,
    /// Free-text borrower name
    pub user_name: String,
    pub equipment_id: i64,
    pub borrow_date: DateTime<Utc>,
    /// Set exactly when `status` is `RETURNED`
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
}

/// Borrow record joined with the equipment it references
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowRecordDetails {
    pub id: i64,
    pub user_name: String,
    pub equipment_id: i64,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
    /// `None` once the equipment has been deleted
    pub equipment: Option<Equipment>,
}

/// Borrow request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrow {
    #[validate(length(min = 1, max = 255, message = "Borrower name must be 1 to 255 characters"))]
    pub user_name: String,
    pub equipment_id: i64,
}

/// Record listing filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RecordQuery {
    /// Only records in this state (`ACTIVE` or `RETURNED`)
    pub status: Option<BorrowStatus>,
}
