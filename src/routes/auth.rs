// SPDX-License-Identifier: MIT

//! Login and logout routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AUTH_COOKIE};
use crate::models::User;
use crate::services::password::verify_password;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Authenticate with email and password. On success the token is both
/// returned in the body and set as an HTTP-only cookie.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    body.validate()?;

    let user = state
        .db
        .find_user_by_email(&body.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // PBKDF2 verification is CPU-heavy, keep it off the async runtime
    let hash = user.password_hash.clone();
    let password = body.password;
    let valid = tokio::task::spawn_blocking(move || verify_password(&hash, &password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking task failed: {e}")))?;

    if !valid {
        tracing::info!(email = %user.email, "Failed login attempt");
        return Err(AppError::Unauthorized);
    }

    let token = create_jwt(user.id, user.role, &state.config.secret_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role.as_str(), "User logged in");

    let jar = jar.add(session_cookie(token.clone()));
    Ok((jar, Json(LoginResponse { token, user })))
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build((AUTH_COOKIE, "")).path("/").build());
    (jar, StatusCode::NO_CONTENT)
}
