// SPDX-License-Identifier: MIT

//! Admin access control and user management guard tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{body_json, create_test_app};

#[tokio::test]
async fn test_employee_cannot_access_admin_routes() {
    let app = create_test_app().await;
    let token = app.token_for(&app.employee);

    for uri in [
        "/api/admin/dashboard",
        "/api/admin/trips",
        "/api/admin/users",
        "/api/admin/deposits",
        "/api/admin/reports",
    ] {
        let response = app.get(uri, &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "uri: {uri}");
    }
}

#[tokio::test]
async fn test_admin_can_access_admin_routes() {
    let app = create_test_app().await;
    let token = app.token_for(&app.admin);

    let response = app.get("/api/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["pending_expenses"].as_array().unwrap().is_empty());
    // Both seeded accounts appear in the balance summary
    assert_eq!(body["balances"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_user_and_duplicate_email() {
    let app = create_test_app().await;
    let token = app.token_for(&app.admin);

    let body = json!({
        "name": "Bruno Lima",
        "email": "bruno@example.com",
        "role": "employee",
        "password": "secret99",
    });

    let response = app
        .send_json("POST", "/api/admin/users", &token, body.clone())
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["email"], "bruno@example.com");
    assert_eq!(created["role"], "employee");

    let response = app.send_json("POST", "/api/admin/users", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_rejects_short_password() {
    let app = create_test_app().await;
    let token = app.token_for(&app.admin);

    let response = app
        .send_json(
            "POST",
            "/api/admin/users",
            &token,
            json!({
                "name": "Bruno",
                "email": "bruno@example.com",
                "role": "employee",
                "password": "abc",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = create_test_app().await;
    let token = app.token_for(&app.admin);

    let response = app
        .delete(&format!("/api/admin/users/{}", app.admin.id), &token)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_second_admin_is_allowed() {
    let app = create_test_app().await;
    let admin_token = app.token_for(&app.admin);

    let response = app
        .send_json(
            "POST",
            "/api/admin/users",
            &admin_token,
            json!({
                "name": "Backup Admin",
                "email": "backup@example.com",
                "role": "admin",
                "password": "secret99",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let backup = body_json(response).await;
    let backup_id = backup["id"].as_i64().unwrap();

    // Two admins exist, deleting one is fine
    let response = app
        .delete(&format!("/api/admin/users/{backup_id}"), &admin_token)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_last_admin_conflict() {
    let app = create_test_app().await;

    // A token from a since-deleted admin still carries the admin role;
    // it must not be able to remove the only remaining admin.
    let stale_token =
        trip_ledger::middleware::auth::create_jwt(9999, trip_ledger::models::Role::Admin, &app.state.config.secret_key)
            .unwrap();

    let response = app
        .delete(&format!("/api/admin/users/{}", app.admin.id), &stale_token)
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_unknown_user() {
    let app = create_test_app().await;
    let token = app.token_for(&app.admin);

    let response = app.delete("/api/admin/users/9999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_with_records_conflicts() {
    let app = create_test_app().await;
    let token = app.token_for(&app.admin);

    let response = app
        .send_json(
            "POST",
            "/api/admin/trips",
            &token,
            json!({
                "user_id": app.employee.id,
                "title": "Client visit",
                "start_date": "2026-03-02",
                "daily_limit": 150.0,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .delete(&format!("/api/admin/users/{}", app.employee.id), &token)
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_reset_user_password() {
    let app = create_test_app().await;
    let token = app.token_for(&app.admin);

    let response = app
        .send_json(
            "PUT",
            &format!("/api/admin/users/{}/password", app.employee.id),
            &token,
            json!({"password": "new-password"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer works
    let response = app
        .send_json(
            "POST",
            "/auth/login",
            "",
            json!({"email": "ana@example.com", "password": common::TEST_PASSWORD}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send_json(
            "POST",
            "/auth/login",
            "",
            json!({"email": "ana@example.com", "password": "new-password"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_users_listing_orders_employees_first() {
    let app = create_test_app().await;
    let token = app.token_for(&app.admin);

    let response = app.get("/api/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["role"], "employee");
    assert_eq!(users[1]["role"], "admin");
}
