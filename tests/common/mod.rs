// SPDX-License-Identifier: MIT

//! Shared helpers for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use tempfile::TempDir;
use tower::ServiceExt;

use trip_ledger::config::Config;
use trip_ledger::db::Database;
use trip_ledger::middleware::auth::create_jwt;
use trip_ledger::models::{Role, User};
use trip_ledger::routes::create_router;
use trip_ledger::services::password::hash_password;
use trip_ledger::services::ReceiptStore;
use trip_ledger::AppState;

/// Password shared by all seeded test accounts.
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "admin123";

/// A running test app with one seeded admin and one seeded employee.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub admin: User,
    pub employee: User,
    _data_dir: TempDir,
    _upload_dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    /// Bearer token for a user.
    pub fn token_for(&self, user: &User) -> String {
        create_jwt(user.id, user.role, &self.state.config.secret_key).unwrap()
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response<Body> {
        self.request(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response<Body> {
        self.request(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

/// Create a test app backed by a temporary SQLite file and upload dir,
/// with an admin and an employee account seeded.
pub async fn create_test_app() -> TestApp {
    let data_dir = tempfile::tempdir().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();

    let config = Config {
        db_path: data_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .into_owned(),
        upload_dir: upload_dir.path().to_string_lossy().into_owned(),
        ..Config::default()
    };

    let db = Database::open(&config.db_path).unwrap();
    let receipts = ReceiptStore::new(&config.upload_dir).unwrap();

    // One hash reused for both accounts; hashing is deliberately slow
    let hash = tokio::task::spawn_blocking(|| hash_password(TEST_PASSWORD))
        .await
        .unwrap()
        .unwrap();

    let admin = db
        .create_user("Admin", &config.admin_email, Role::Admin, &hash)
        .await
        .unwrap();
    let employee = db
        .create_user("Ana Souza", "ana@example.com", Role::Employee, &hash)
        .await
        .unwrap();

    let state = Arc::new(AppState {
        config,
        db,
        receipts,
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        admin,
        employee,
        _data_dir: data_dir,
        _upload_dir: upload_dir,
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Build a multipart form body for expense submission.
#[allow(dead_code)]
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"receipt\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
