//! Dashboard snapshot

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{borrow_record::BorrowRecordDetails, equipment::Equipment};

/// Everything the lending dashboard shows in one read
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    pub equipment: Vec<Equipment>,
    pub active_records: Vec<BorrowRecordDetails>,
    pub totals: DashboardTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardTotals {
    /// Number of equipment kinds
    pub equipment_kinds: i64,
    pub units_total: i64,
    pub units_available: i64,
    pub active_loans: i64,
}

impl DashboardTotals {
    /// Sums saturate instead of overflowing
    pub fn from_parts(equipment: &[Equipment], active_loans: i64) -> Self {
        Self {
            equipment_kinds: equipment.len() as i64,
            units_total: equipment.iter().fold(0i64, |sum, e| sum.saturating_add(e.total)),
            units_available: equipment
                .iter()
                .fold(0i64, |sum, e| sum.saturating_add(e.available)),
            active_loans,
        }
    }
}
