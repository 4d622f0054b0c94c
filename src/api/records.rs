//! Borrow record endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::borrow_record::{BorrowRecord, BorrowRecordDetails, CreateBorrow, RecordQuery},
};

/// Return outcome
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// False when the record was missing or already returned
    pub returned: bool,
    pub record: Option<BorrowRecord>,
}

/// History clear outcome
#[derive(Serialize, ToSchema)]
pub struct ClearHistoryResponse {
    /// Number of records removed
    pub deleted: u64,
}

/// List borrow records, newest first
#[utoipa::path(
    get,
    path = "/records",
    tag = "records",
    params(RecordQuery),
    responses(
        (status = 200, description = "Borrow records joined with equipment", body = Vec<BorrowRecordDetails>)
    )
)]
pub async fn list_records(
    State(state): State<crate::AppState>,
    Query(query): Query<RecordQuery>,
) -> AppResult<Json<Vec<BorrowRecordDetails>>> {
    let records = state.services.lending.list_records(query.status).await?;
    Ok(Json(records))
}

/// Borrow one unit of equipment
#[utoipa::path(
    post,
    path = "/records",
    tag = "records",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Record created", body = BorrowRecord),
        (status = 400, description = "Missing borrower name", body = crate::error::ErrorResponse),
        (status = 409, description = "Out of stock", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<BorrowRecord>)> {
    let record = state.services.lending.borrow(&request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Return a borrowed unit
#[utoipa::path(
    post,
    path = "/records/{id}/return",
    tag = "records",
    params(("id" = i64, Path, description = "Borrow record ID")),
    responses(
        (status = 200, description = "Return processed (idempotent)", body = ReturnResponse)
    )
)]
pub async fn return_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReturnResponse>> {
    let record = state.services.lending.return_item(id).await?;
    Ok(Json(ReturnResponse {
        returned: record.is_some(),
        record,
    }))
}

/// Delete the whole borrow history
#[utoipa::path(
    delete,
    path = "/records",
    tag = "records",
    responses(
        (status = 200, description = "History cleared", body = ClearHistoryResponse)
    )
)]
pub async fn clear_history(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ClearHistoryResponse>> {
    let deleted = state.services.lending.clear_history().await?;
    Ok(Json(ClearHistoryResponse { deleted }))
}
