//! Business logic services

pub mod changes;
pub mod equipment;
pub mod lending;

use crate::{config::LendingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub lending: lending::LendingService,
    pub changes: changes::ChangeNotifier,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lending_config: LendingConfig) -> Self {
        let changes = changes::ChangeNotifier::new();
        Self {
            equipment: equipment::EquipmentService::new(
                repository.clone(),
                changes.clone(),
                lending_config.clone(),
            ),
            lending: lending::LendingService::new(repository.clone(), changes.clone(), lending_config),
            changes,
            repository,
        }
    }
}

#[cfg(test)]
pub(crate) async fn test_services(lending_config: LendingConfig) -> Services {
    Services::new(crate::repository::test_repository().await, lending_config)
}
