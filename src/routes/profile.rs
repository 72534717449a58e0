// SPDX-License-Identifier: MIT

//! Profile routes: account details, balance summary and statement.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::db::Period;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{StatementEntry, Totals, User};
use crate::services::export::statement_csv;
use crate::services::password::hash_password;
use crate::time_utils::resolve_period;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/me/summary", get(get_summary))
        .route("/api/me/statement", get(get_statement))
        .route("/api/me/statement.csv", get(get_statement_csv))
}

/// Period filters for the summary and statement endpoints.
/// `scope=all` disables the date filter; otherwise missing bounds
/// default to the current month to date.
#[derive(Deserialize)]
pub struct PeriodQuery {
    #[serde(default = "default_scope")]
    pub scope: String,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub include_rejected: bool,
}

fn default_scope() -> String {
    "month".to_string()
}

impl PeriodQuery {
    pub fn period(&self) -> Result<Period> {
        resolve_period(&self.scope, self.start.as_deref(), self.end.as_deref())
    }
}

async fn current_user(state: &AppState, auth: &AuthUser) -> Result<User> {
    // A valid token for a since-deleted account is no longer a session
    state
        .db
        .get_user(auth.user_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

/// Get the current user's account.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<User>> {
    let user = current_user(&state, &auth).await?;
    Ok(Json(user))
}

#[derive(Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub bank_info: String,
    /// New password; omit to keep the current one
    #[validate(length(min = 6))]
    pub password: Option<String>,
}

/// Update name, bank details and optionally the password.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<User>> {
    body.validate()?;
    current_user(&state, &auth).await?;

    let password_hash = match body.password {
        Some(password) => Some(
            tokio::task::spawn_blocking(move || hash_password(&password))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking task failed: {e}")))??,
        ),
        None => None,
    };

    state
        .db
        .update_profile(
            auth.user_id,
            &body.name,
            &body.bank_info,
            password_hash.as_deref(),
        )
        .await?;

    let user = current_user(&state, &auth).await?;
    Ok(Json(user))
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub totals: Totals,
    /// Resolved period bounds, absent for `scope=all`
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Deposit/expense totals for the current user over a period.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<SummaryResponse>> {
    let period = query.period()?;
    let totals = state
        .db
        .user_totals(auth.user_id, period.clone(), query.include_rejected)
        .await?;

    let (start, end) = match period {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };

    Ok(Json(SummaryResponse { totals, start, end }))
}

/// The current user's unified statement.
async fn get_statement(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<StatementEntry>>> {
    let period = query.period()?;
    let entries = state
        .db
        .user_statement(auth.user_id, period, query.include_rejected)
        .await?;
    Ok(Json(entries))
}

/// The statement as a CSV download.
async fn get_statement_csv(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse> {
    let user = current_user(&state, &auth).await?;
    let period = query.period()?;
    let entries = state
        .db
        .user_statement(auth.user_id, period, query.include_rejected)
        .await?;

    let filename = format!("statement_{}.csv", user.name.replace(' ', "_"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        statement_csv(&entries),
    ))
}
