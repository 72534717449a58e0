// SPDX-License-Identifier: MIT

//! Login, logout and session token tests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

mod common;

use common::{body_json, create_test_app, TEST_PASSWORD};

#[tokio::test]
async fn test_login_success_sets_cookie_and_returns_token() {
    let app = create_test_app().await;

    let response = app
        .request(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "ana@example.com", "password": TEST_PASSWORD}).to_string(),
                ))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("trip_ledger_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));

    let body = body_json(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert_eq!(body["user"]["role"], "employee");
    // The hash must never leak into responses
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app().await;

    let response = app
        .request(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "ana@example.com", "password": "wrong-password"}).to_string(),
                ))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = create_test_app().await;

    let response = app
        .request(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "nobody@example.com", "password": TEST_PASSWORD}).to_string(),
                ))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = create_test_app().await;

    let response = app
        .request(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("trip_ledger_token="));
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = create_test_app().await;

    let response = app
        .request(Request::builder().uri("/api/me").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_bearer_token() {
    let app = create_test_app().await;
    let token = app.token_for(&app.employee);

    let response = app.get("/api/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Ana Souza");
}

#[tokio::test]
async fn test_protected_route_with_cookie() {
    let app = create_test_app().await;
    let token = app.token_for(&app.employee);

    let response = app
        .request(
            Request::builder()
                .uri("/api/me")
                .header(header::COOKIE, format!("trip_ledger_token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = create_test_app().await;

    let response = app.get("/api/me", "not-a-valid-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = create_test_app().await;

    let response = app
        .request(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
