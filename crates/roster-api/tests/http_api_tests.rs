// HTTP tests for the employee and export endpoints
// Each test runs its own server on an OS-assigned port with a temp database

use calamine::{Data, Reader, Xlsx};
use roster_api::{build_router, spawn_sync_worker, AppState, SyncHandle};
use roster_engine::{SyncConfig, Synchronizer};
use roster_store::SqliteEmployeeStore;
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;

struct TestServer {
    base: String,
    client: reqwest::Client,
    sync_handle: SyncHandle,
    _temp_dir: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn create(&self, body: Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/employees"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn flush(&self) {
        self.sync_handle.flush().await.unwrap();
    }
}

/// Spin up the HTTP server on an OS-assigned port.
async fn spawn_test_server() -> TestServer {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteEmployeeStore::open(temp_dir.path().join("roster.db")).unwrap());
    let config = SyncConfig::new(temp_dir.path().join("employee_dataset.xlsx"));
    let sync = Arc::new(Synchronizer::new(store, config));
    let (sync_handle, _worker) = spawn_sync_worker(sync.clone());

    let app = build_router(AppState::new(sync, Arc::new(sync_handle.clone())));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        sync_handle,
        _temp_dir: temp_dir,
    }
}

fn ana() -> Value {
    json!({
        "name": "Ana",
        "email": "ana@x.com",
        "position": "Engineer",
        "department": "R&D",
        "salary": 90000
    })
}

fn sheet_rows(bytes: Vec<u8>) -> Vec<Vec<Data>> {
    let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Employees").unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let server = spawn_test_server().await;

    let resp = server.create(ana()).await;
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["salary"], 90000.0);
}

#[tokio::test]
async fn create_without_email_returns_400() {
    let server = spawn_test_server().await;

    let resp = server.create(json!({"name": "Ana"})).await;
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Name and Email are required");
    assert_eq!(body["code"], "ERR_INVALID_INPUT");
}

#[tokio::test]
async fn malformed_body_returns_400() {
    let server = spawn_test_server().await;

    let resp = server
        .client
        .post(server.url("/api/employees"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "ERR_INVALID_INPUT");
}

#[tokio::test]
async fn list_returns_all_in_creation_order() {
    let server = spawn_test_server().await;
    server.create(ana()).await;
    server
        .create(json!({"name": "Bo", "email": "bo@x.com"}))
        .await;

    let body: Vec<Value> = reqwest::get(server.url("/api/employees"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let names: Vec<&str> = body.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Ana", "Bo"]);
}

#[tokio::test]
async fn get_unknown_employee_returns_404() {
    let server = spawn_test_server().await;

    let resp = reqwest::get(server.url("/api/employees/nope")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Employee not found");
    assert_eq!(body["code"], "ERR_NOT_FOUND");
}

#[tokio::test]
async fn update_patches_fields() {
    let server = spawn_test_server().await;
    let created: Value = server.create(ana()).await.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    let resp = server
        .client
        .put(server.url(&format!("/api/employees/{}", id)))
        .json(&json!({"salary": 95000, "position": null}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], id);
    assert_eq!(body["salary"], 95000.0);
    assert!(body["position"].is_null());
    assert_eq!(body["department"], "R&D");
}

#[tokio::test]
async fn update_unknown_employee_returns_404() {
    let server = spawn_test_server().await;

    let resp = server
        .client
        .put(server.url("/api/employees/nope"))
        .json(&json!({"name": "X"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_then_get_returns_404() {
    let server = spawn_test_server().await;
    let created: Value = server.create(ana()).await.json().await.unwrap();
    let path = format!("/api/employees/{}", created["id"].as_str().unwrap());

    let resp = server.client.delete(server.url(&path)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Employee deleted"}));

    let again = server.client.delete(server.url(&path)).send().await.unwrap();
    assert_eq!(again.status(), 404);
}

#[tokio::test]
async fn export_before_any_mutation_returns_404() {
    let server = spawn_test_server().await;

    let resp = reqwest::get(server.url("/api/export")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Excel file not found");
}

#[tokio::test]
async fn export_follows_create_and_delete() {
    let server = spawn_test_server().await;
    let created: Value = server.create(ana()).await.json().await.unwrap();
    server.flush().await;

    let resp = reqwest::get(server.url("/api/export")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        resp.headers()["content-disposition"],
        "attachment; filename=\"employee_dataset.xlsx\""
    );
    let rows = sheet_rows(resp.bytes().await.unwrap().to_vec());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], Data::String("Ana".into()));

    server
        .client
        .delete(server.url(&format!("/api/employees/{}", created["id"].as_str().unwrap())))
        .send()
        .await
        .unwrap();
    server.flush().await;

    let bytes = reqwest::get(server.url("/api/export"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let rows = sheet_rows(bytes.to_vec());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Data::String("name".into()));
}

#[tokio::test]
async fn export_status_reports_versions() {
    let server = spawn_test_server().await;

    let before: Value = reqwest::get(server.url("/api/export/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(before["committed_version"], 0);
    assert!(before["artifact"].is_null());

    server.create(ana()).await;
    server.create(json!({"name": "Bo", "email": "bo@x.com"})).await;
    server.flush().await;

    let after: Value = reqwest::get(server.url("/api/export/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after["committed_version"], 2);
    assert_eq!(after["exported_version"], 2);
    assert_eq!(after["stale"], false);
    assert_eq!(after["total_failures"], 0);
    assert!(after["artifact"]["size_bytes"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = spawn_test_server().await;

    let resp = reqwest::get(server.url("/api/employees")).await.unwrap();
    let request_id = resp.headers()["x-request-id"].to_str().unwrap();
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let server = spawn_test_server().await;
    let resp = reqwest::get(server.url("/api/nonexistent")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn inbound_request_id_is_echoed() {
    let server = spawn_test_server().await;

    let resp = server
        .client
        .get(server.url("/api/employees"))
        .header("x-request-id", "client-abc-123")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.headers()["x-request-id"], "client-abc-123");
}
