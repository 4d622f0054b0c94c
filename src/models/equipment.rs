//! Equipment model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Upper bound on units of one equipment kind; keeps every counter and sum
/// well inside `i64`
pub const MAX_UNITS: i64 = 1_000_000_000;

/// Borrowable equipment kind with its stock counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i64,
    /// Display label
    pub name: String,
    /// Units owned
    pub total: i64,
    /// Units not currently on loan (always `0 <= available <= total`)
    pub available: i64,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    /// Initial stock; every unit starts available
    #[validate(range(min = 0, max = 1_000_000_000, message = "Total must be between 0 and 1000000000"))]
    pub total: i64,
}

/// Stock adjustment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustStock {
    /// Units added (positive) or removed (negative); applied to total and available alike
    pub delta: i64,
}
