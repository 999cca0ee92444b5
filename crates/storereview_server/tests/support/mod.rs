//! Shared integration-test server bootstrap helpers.

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};
use std::path::Path;
use storereview_server::{create_app, AppState, Config, Database};
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_body_size: 64 * 1024,
        auto_backup: false,
    }
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = test_config_for_db_path(&db_path);
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let app = create_app(AppState::new(config, db), false);
    let server = TestServer::new(app).expect("server");
    (server, temp_dir)
}

/// Attach a caller identity header.
pub(crate) fn as_user(request: TestRequest, user_id: &str) -> TestRequest {
    request.add_header(
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_str(user_id).expect("header value"),
    )
}

pub(crate) fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("id field").to_string()
}

pub(crate) async fn create_store(server: &TestServer, name: &str) -> String {
    let response = server
        .post("/api/store")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status_ok();
    id_of(&response.json())
}

pub(crate) async fn create_menu(server: &TestServer, store_id: &str, name: &str) -> String {
    let response = server
        .post(&format!("/api/store/{}/menu", store_id))
        .json(&json!({ "name": name, "price": 12_000 }))
        .await;
    response.assert_status_ok();
    id_of(&response.json())
}

pub(crate) async fn register_file(server: &TestServer, store_id: &str, key: &str) -> String {
    let response = server
        .post(&format!("/api/store/{}/file", store_id))
        .json(&json!({ "object_key": key, "content_type": "image/png" }))
        .await;
    response.assert_status_ok();
    id_of(&response.json())
}
