//! Lending service: borrow, return and history

use validator::Validate;

use crate::{
    config::LendingConfig,
    error::AppResult,
    models::{
        borrow_record::{BorrowRecord, BorrowRecordDetails, BorrowStatus, CreateBorrow},
        change::ChangeEvent,
        dashboard::{Dashboard, DashboardTotals},
    },
    repository::Repository,
};

use super::changes::ChangeNotifier;

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
    changes: ChangeNotifier,
    config: LendingConfig,
}

impl LendingService {
    pub fn new(repository: Repository, changes: ChangeNotifier, config: LendingConfig) -> Self {
        Self {
            repository,
            changes,
            config,
        }
    }

    /// Borrow history, newest first
    pub async fn list_records(&self, status: Option<BorrowStatus>) -> AppResult<Vec<BorrowRecordDetails>> {
        self.repository.records.list(status).await
    }

    /// Records still out on loan
    pub async fn list_active_records(&self) -> AppResult<Vec<BorrowRecordDetails>> {
        self.repository.records.list(Some(BorrowStatus::Active)).await
    }

    /// Lend one unit of equipment to a borrower
    pub async fn borrow(&self, request: &CreateBorrow) -> AppResult<BorrowRecord> {
        let request = CreateBorrow {
            user_name: request.user_name.trim().to_string(),
            equipment_id: request.equipment_id,
        };
        request.validate()?;

        match self.repository.records.borrow(&request.user_name, request.equipment_id).await {
            Ok(record) => {
                tracing::info!(
                    record_id = record.id,
                    equipment_id = record.equipment_id,
                    user = %record.user_name,
                    "Equipment borrowed"
                );
                self.changes.publish(ChangeEvent::Records);
                self.changes.publish(ChangeEvent::Equipment);
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(equipment_id = request.equipment_id, "Borrow refused: {}", e);
                Err(e)
            }
        }
    }

    /// Return a borrowed unit. `Ok(None)` means there was nothing to return.
    pub async fn return_item(&self, record_id: i64) -> AppResult<Option<BorrowRecord>> {
        let returned = self.repository.records.return_record(record_id).await?;
        match &returned {
            Some(record) => {
                tracing::info!(record_id, equipment_id = record.equipment_id, "Equipment returned");
                self.changes.publish(ChangeEvent::Records);
                self.changes.publish(ChangeEvent::Equipment);
            }
            None => tracing::debug!(record_id, "Nothing to return"),
        }
        Ok(returned)
    }

    /// Delete the whole borrow history
    pub async fn clear_history(&self) -> AppResult<u64> {
        let reconcile = self.config.reconcile_on_clear;
        let deleted = self.repository.records.clear(reconcile).await?;
        tracing::info!(deleted, reconcile, "Borrow history cleared");

        self.changes.publish(ChangeEvent::Records);
        if reconcile {
            self.changes.publish(ChangeEvent::Equipment);
        }
        Ok(deleted)
    }

    /// Stock and active loans in one snapshot
    pub async fn dashboard(&self) -> AppResult<Dashboard> {
        let equipment = self.repository.equipment.list().await?;
        let active_records = self.list_active_records().await?;
        let totals = DashboardTotals::from_parts(&equipment, active_records.len() as i64);
        Ok(Dashboard {
            equipment,
            active_records,
            totals,
        })
    }
}
