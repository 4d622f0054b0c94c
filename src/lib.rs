//! SportLend Equipment Lending Tracker
//!
//! Tracks borrowable equipment and who has it: a REST JSON API over a
//! SQLite store, with borrow and return applied atomically.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Open the store described by `config` and wire every service to it
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let repository = repository::Repository::connect(&config.database).await?;
        let services = services::Services::new(repository, config.lending.clone());
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
