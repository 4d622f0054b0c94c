//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{changes, dashboard, equipment, health, records};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SportLend API",
        version = "1.0.0",
        description = "Equipment lending tracker REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::adjust_stock,
        equipment::delete_equipment,
        // Records
        records::list_records,
        records::borrow,
        records::return_record,
        records::clear_history,
        // Dashboard
        dashboard::get_dashboard,
        changes::stream_changes,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::AdjustStock,
            // Records
            crate::models::borrow_record::BorrowStatus,
            crate::models::borrow_record::BorrowRecord,
            crate::models::borrow_record::BorrowRecordDetails,
            crate::models::borrow_record::CreateBorrow,
            records::ReturnResponse,
            records::ClearHistoryResponse,
            // Dashboard
            crate::models::dashboard::Dashboard,
            crate::models::dashboard::DashboardTotals,
            crate::models::change::ChangeEvent,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment catalog and stock"),
        (name = "records", description = "Borrowing, returns and history"),
        (name = "dashboard", description = "Dashboard snapshot and change stream")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
