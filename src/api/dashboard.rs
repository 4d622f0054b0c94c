//! Dashboard endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::dashboard::Dashboard};

/// Stock levels and active loans
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard snapshot", body = Dashboard)
    )
)]
pub async fn get_dashboard(State(state): State<crate::AppState>) -> AppResult<Json<Dashboard>> {
    let dashboard = state.services.lending.dashboard().await?;
    Ok(Json(dashboard))
}
