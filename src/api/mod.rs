//! API handlers for SportLend REST endpoints

pub mod changes;
pub mod dashboard;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod records;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(equipment::get_equipment).delete(equipment::delete_equipment),
        )
        .route("/equipment/:id/stock", post(equipment::adjust_stock))
        // Borrow records
        .route(
            "/records",
            get(records::list_records)
                .post(records::borrow)
                .delete(records::clear_history),
        )
        .route("/records/:id/return", post(records::return_record))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/changes", get(changes::stream_changes))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
