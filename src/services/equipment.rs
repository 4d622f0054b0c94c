//! Equipment service

use validator::Validate;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::{
        change::ChangeEvent,
        equipment::{CreateEquipment, Equipment},
    },
    repository::Repository,
};

use super::changes::ChangeNotifier;

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    changes: ChangeNotifier,
    config: LendingConfig,
}

impl EquipmentService {
    pub fn new(repository: Repository, changes: ChangeNotifier, config: LendingConfig) -> Self {
        Self {
            repository,
            changes,
            config,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let data = CreateEquipment {
            name: data.name.trim().to_string(),
            total: data.total,
        };
        data.validate()?;

        let equipment = self.repository.equipment.create(&data.name, data.total).await?;
        tracing::info!(id = equipment.id, name = %equipment.name, total = equipment.total, "Equipment added");
        self.changes.publish(ChangeEvent::Equipment);
        Ok(equipment)
    }

    /// Add or remove units. Both counters move by `delta`; the call is
    /// rejected when either would drop below zero.
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> AppResult<Equipment> {
        match self.repository.equipment.adjust_stock(id, delta).await {
            Ok(equipment) => {
                tracing::info!(id, delta, total = equipment.total, available = equipment.available, "Stock adjusted");
                self.changes.publish(ChangeEvent::Equipment);
                Ok(equipment)
            }
            Err(e) => {
                tracing::warn!(id, delta, "Stock adjustment rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Delete equipment.
    ///
    /// A failure of the DELETE statement itself is logged and reported as
    /// `Ok(false)` rather than propagated.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let equipment = self.repository.equipment.get_by_id(id).await?;

        let block = self.config.block_delete_with_active_loans;
        let result = if block {
            self.repository.equipment.delete_if_not_on_loan(id).await
        } else {
            self.repository.equipment.delete(id).await
        };

        match result {
            Ok(true) => {
                tracing::info!(id, name = %equipment.name, "Equipment deleted");
                self.changes.publish(ChangeEvent::Equipment);
                Ok(true)
            }
            Ok(false) => {
                if block {
                    let active = self.repository.records.count_active_for_equipment(id).await?;
                    if active > 0 {
                        tracing::warn!(id, active, "Delete refused, equipment is on loan");
                        return Err(AppError::Conflict(format!(
                            "'{}' has {} active loan(s)",
                            equipment.name, active
                        )));
                    }
                }
                Ok(false)
            }
            Err(e) => {
                tracing::error!(id, "Delete failed: {}", e);
                Ok(false)
            }
        }
    }
}
