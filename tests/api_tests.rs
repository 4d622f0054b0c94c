//! API integration tests against an in-memory store

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sportlend_server::{
    api,
    config::{AppConfig, DatabaseConfig, LendingConfig},
    AppState,
};

async fn app_with(lending: LendingConfig) -> Router {
    let config = AppConfig {
        database: DatabaseConfig::in_memory(),
        lending,
        ..AppConfig::default()
    };
    let state = AppState::build(config).await.expect("Failed to build state");
    api::router(state)
}

async fn app() -> Router {
    app_with(LendingConfig::default()).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn add_equipment(app: &Router, name: &str, total: i64) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/equipment",
        Some(json!({ "name": name, "total": total })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_add_and_list_equipment() {
    let app = app().await;
    let ball = add_equipment(&app, "Ball", 5).await;
    assert_eq!(ball["total"], 5);
    assert_eq!(ball["available"], 5);
    add_equipment(&app, "Net", 1).await;

    let (status, body) = send(&app, "GET", "/api/v1/equipment", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ball", "Net"]);
}

#[tokio::test]
async fn test_add_equipment_validation() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/equipment",
        Some(json!({ "name": "", "total": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/equipment",
        Some(json!({ "name": "Ball", "total": -2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_equipment() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/equipment/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchItem");
}

#[tokio::test]
async fn test_adjust_stock() {
    let app = app().await;
    let ball = add_equipment(&app, "Ball", 1).await;
    let id = ball["id"].as_i64().unwrap();

    let uri = format!("/api/v1/equipment/{}/stock", id);
    let (status, body) = send(&app, "POST", &uri, Some(json!({ "delta": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!((body["total"].as_i64(), body["available"].as_i64()), (Some(3), Some(3)));

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "delta": -4 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", &format!("/api/v1/equipment/{}", id), None).await;
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_stock_overflow_is_rejected() {
    let app = app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/equipment",
        Some(json!({ "name": "Ball", "total": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let ball = add_equipment(&app, "Ball", 5).await;
    let uri = format!("/api/v1/equipment/{}/stock", ball["id"]);
    let (status, _) = send(&app, "POST", &uri, Some(json!({ "delta": i64::MAX }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/v1/equipment", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["total"], 5);
    let (status, _) = send(&app, "GET", "/api/v1/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_borrow_and_return_flow() {
    let app = app().await;
    let ball = add_equipment(&app, "Ball", 2).await;
    let id = ball["id"].as_i64().unwrap();

    let (status, record) = send(
        &app,
        "POST",
        "/api/v1/records",
        Some(json!({ "user_name": "alice", "equipment_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["status"], "ACTIVE");
    assert!(record["return_date"].is_null());

    let (_, body) = send(&app, "GET", &format!("/api/v1/equipment/{}", id), None).await;
    assert_eq!(body["available"], 1);

    let (_, active) = send(&app, "GET", "/api/v1/records?status=ACTIVE", None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["equipment"]["name"], "Ball");

    let return_uri = format!("/api/v1/records/{}/return", record["id"]);
    let (status, body) = send(&app, "POST", &return_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["returned"], true);
    assert_eq!(body["record"]["status"], "RETURNED");
    assert!(body["record"]["return_date"].is_string());

    let (status, body) = send(&app, "POST", &return_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["returned"], false);

    let (_, body) = send(&app, "GET", &format!("/api/v1/equipment/{}", id), None).await;
    assert_eq!(body["available"], 2);
}

#[tokio::test]
async fn test_borrow_out_of_stock() {
    let app = app().await;
    let ball = add_equipment(&app, "Ball", 0).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/records",
        Some(json!({ "user_name": "alice", "equipment_id": ball["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemNotAvailable");

    let (_, records) = send(&app, "GET", "/api/v1/records", None).await;
    assert!(records.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_equipment() {
    let app = app().await;
    let ball = add_equipment(&app, "Ball", 1).await;
    let uri = format!("/api/v1/equipment/{}", ball["id"]);

    send(
        &app,
        "POST",
        "/api/v1/records",
        Some(json!({ "user_name": "alice", "equipment_id": ball["id"] })),
    )
    .await;
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let net = add_equipment(&app, "Net", 1).await;
    let (status, _) = send(&app, "DELETE", &format!("/api/v1/equipment/{}", net["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/equipment/{}", net["id"]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_history() {
    let app = app().await;
    let ball = add_equipment(&app, "Ball", 2).await;
    send(
        &app,
        "POST",
        "/api/v1/records",
        Some(json!({ "user_name": "alice", "equipment_id": ball["id"] })),
    )
    .await;

    let (status, body) = send(&app, "DELETE", "/api/v1/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 1);

    let (_, records) = send(&app, "GET", "/api/v1/records", None).await;
    assert!(records.as_array().unwrap().is_empty());

    // Active loan vanished from history, unit is still counted as out
    let (_, body) = send(&app, "GET", &format!("/api/v1/equipment/{}", ball["id"]), None).await;
    assert_eq!(body["available"], 1);
}

#[tokio::test]
async fn test_clear_history_with_reconcile() {
    let app = app_with(LendingConfig {
        reconcile_on_clear: true,
        ..LendingConfig::default()
    })
    .await;
    let ball = add_equipment(&app, "Ball", 2).await;
    send(
        &app,
        "POST",
        "/api/v1/records",
        Some(json!({ "user_name": "alice", "equipment_id": ball["id"] })),
    )
    .await;

    send(&app, "DELETE", "/api/v1/records", None).await;
    let (_, body) = send(&app, "GET", &format!("/api/v1/equipment/{}", ball["id"]), None).await;
    assert_eq!(body["available"], 2);
}

#[tokio::test]
async fn test_dashboard() {
    let app = app().await;
    let ball = add_equipment(&app, "Ball", 3).await;
    add_equipment(&app, "Net", 1).await;
    send(
        &app,
        "POST",
        "/api/v1/records",
        Some(json!({ "user_name": "alice", "equipment_id": ball["id"] })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/v1/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["equipment"].as_array().unwrap().len(), 2);
    assert_eq!(body["active_records"][0]["user_name"], "alice");
    assert_eq!(body["totals"]["units_total"], 4);
    assert_eq!(body["totals"]["units_available"], 3);
    assert_eq!(body["totals"]["active_loans"], 1);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/records"].is_object());
}
