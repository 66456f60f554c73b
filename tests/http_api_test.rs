//! HTTP API tests.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot` over a
//! temporary data directory.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use seed_share::{build_router, AppState, LocalStorage, SeedStore, SelectionPolicy, StoreOptions};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app(temp_dir: &TempDir, base_path: &str) -> Router {
    let storage = Arc::new(LocalStorage::new(temp_dir.path()));
    let store = SeedStore::open(storage, StoreOptions::default())
        .await
        .unwrap();
    let state = AppState::new(Arc::new(store), SelectionPolicy::default(), 9);
    build_router(state, base_path)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let (status, bytes) = send(app, request).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn sample_seeds() -> Value {
    json!([
        { "id": 2, "family": "가지과", "name": "까망가지", "quantity": 6 },
        { "id": 1, "family": "십자화과", "name": "갓", "quantity": 7 },
        { "id": 3, "family": "국화과", "name": "상추", "quantity": 0 }
    ])
}

fn application(seeds: Value, is_member: bool) -> Value {
    json!({
        "name": "Test User",
        "phone": "010-1111-2222",
        "address": "Test Address",
        "isMember": is_member,
        "selectedSeeds": seeds
    })
}

#[tokio::test]
async fn test_replace_and_list_seeds_in_id_order() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "/api").await;

    let (status, body) = send_json(&app, Method::POST, "/api/seeds", Some(sample_seeds())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send_json(&app, Method::GET, "/api/seeds", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_replace_seeds_rejects_non_array() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "/api").await;

    let (status, body) =
        send_json(&app, Method::POST, "/api/seeds", Some(json!({ "id": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid data format" }));

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/seeds",
        Some(json!([{ "id": 1, "family": "x", "name": "y", "quantity": -3 }])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_apply_success_then_applicants_listed() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "/api").await;
    send_json(&app, Method::POST, "/api/seeds", Some(sample_seeds())).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/apply",
        Some(application(json!([1, 2]), true)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, seeds) = send_json(&app, Method::GET, "/api/seeds", None).await;
    assert_eq!(seeds[0]["quantity"], 6);
    assert_eq!(seeds[1]["quantity"], 5);

    let (status, applicants) = send_json(&app, Method::GET, "/api/applicants", None).await;
    assert_eq!(status, StatusCode::OK);
    let applicants = applicants.as_array().unwrap();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0]["name"], "Test User");
    assert_eq!(applicants[0]["isMember"], true);
    assert_eq!(applicants[0]["selectedSeeds"], json!([1, 2]));
    let timestamp = applicants[0]["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_apply_errors_are_400_with_message() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "/api").await;
    send_json(&app, Method::POST, "/api/seeds", Some(sample_seeds())).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/apply",
        Some(json!({ "name": "Kim", "selectedSeeds": [1] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required fields" }));

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/apply",
        Some(application(json!([1, 2, 1, 2, 1, 2]), false)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "You can only select up to 5 seeds." }));

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/apply",
        Some(application(json!([1, 3]), false)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Seed 상추 is out of stock." }));

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/apply",
        Some(application(json!([77]), false)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid seed ID: 77" }));

    // 全部失敗，庫存不變
    let (_, seeds) = send_json(&app, Method::GET, "/api/seeds", None).await;
    assert_eq!(seeds[0]["quantity"], 7);
    let (_, applicants) = send_json(&app, Method::GET, "/api/applicants", None).await;
    assert_eq!(applicants, json!([]));
}

#[tokio::test]
async fn test_delete_applicants() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "/api").await;
    send_json(&app, Method::POST, "/api/seeds", Some(sample_seeds())).await;
    send_json(
        &app,
        Method::POST,
        "/api/apply",
        Some(application(json!([1]), false)),
    )
    .await;

    let (status, body) = send_json(&app, Method::DELETE, "/api/applicants", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, applicants) = send_json(&app, Method::GET, "/api/applicants", None).await;
    assert_eq!(applicants, json!([]));
}

fn multipart_request(uri: &str, field: &str, content: &str) -> Request<Body> {
    let boundary = "seedshareboundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"seeds.csv\"\r\nContent-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
        b = boundary,
        f = field,
        c = content
    );

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_init_seeds_from_csv_upload() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "/api").await;
    send_json(&app, Method::POST, "/api/seeds", Some(sample_seeds())).await;

    let csv = "번호,과 (Family),품종명,개수(봉)\n10,콩과,강낭콩,4\n,콩과,이름만,3\n11,콩과,,2\n12,박과,애호박,9";
    let (status, bytes) = send(&app, multipart_request("/api/seeds/init", "file", csv)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "success": true, "count": 2 }));

    let (_, seeds) = send_json(&app, Method::GET, "/api/seeds", None).await;
    assert_eq!(
        seeds,
        json!([
            { "id": 10, "family": "콩과", "name": "강낭콩", "quantity": 4 },
            { "id": 12, "family": "박과", "name": "애호박", "quantity": 9 }
        ])
    );
}

#[tokio::test]
async fn test_init_seeds_without_file_is_400() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "/api").await;

    let (status, bytes) = send(&app, multipart_request("/api/seeds/init", "other", "x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "No file uploaded" }));

    let (status, body) = send_json(&app, Method::POST, "/api/seeds/init", Some(json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No file uploaded" }));
}

#[tokio::test]
async fn test_export_applicants_csv() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "/api").await;
    send_json(&app, Method::POST, "/api/seeds", Some(sample_seeds())).await;
    send_json(
        &app,
        Method::POST,
        "/api/apply",
        Some(application(json!([1, 2]), true)),
    )
    .await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/applicants/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"applicants_list.csv\""
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.trim_start_matches('\u{FEFF}').lines();
    assert_eq!(lines.next().unwrap(), "Time,Name,Phone,Address,IsMember,Seeds");
    let row = lines.next().unwrap();
    assert!(row.contains("\"Test User\""));
    assert!(row.contains("\"회원\""));
    assert!(row.ends_with("\"갓; 까망가지\""));
}

#[tokio::test]
async fn test_routes_at_root_when_base_path_empty() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(&temp_dir, "").await;

    let (status, body) = send_json(&app, Method::GET, "/seeds", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = send_json(&app, Method::GET, "/api/seeds", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
