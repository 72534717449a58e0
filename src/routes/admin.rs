// SPDX-License-Identifier: MIT

//! Admin routes: dashboard, trips, users, deposits and approvals.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    Deposit, DepositWithNames, Expense, ExpenseStatus, ExpenseWithNames, Role, Trip,
    TripWithOwner, User, UserBalance,
};
use crate::services::password::hash_password;
use crate::time_utils::parse_iso_date;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/dashboard", get(dashboard))
        .route("/api/admin/trips", get(list_trips).post(create_trip))
        .route("/api/admin/trips/{id}/owner", put(reassign_trip))
        .route("/api/admin/users", get(list_users).post(create_user))
        .route("/api/admin/users/{id}/password", put(set_user_password))
        .route("/api/admin/users/{id}", delete(delete_user))
        .route("/api/admin/deposits", get(list_deposits).post(create_deposit))
        .route("/api/admin/expenses/{id}/status", put(set_expense_status))
}

async fn hash_on_blocking_pool(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking task failed: {e}")))?
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardResponse {
    /// Approval queue, oldest submission first
    pub pending_expenses: Vec<ExpenseWithNames>,
    /// Per-employee balances across all time
    pub balances: Vec<UserBalance>,
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Json<DashboardResponse>> {
    let pending_expenses = state.db.pending_expenses().await?;
    let balances = state.db.user_balances().await?;
    Ok(Json(DashboardResponse {
        pending_expenses,
        balances,
    }))
}

// ─── Trips ───────────────────────────────────────────────────

async fn list_trips(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TripWithOwner>>> {
    let trips = state.db.list_trips_with_owners().await?;
    Ok(Json(trips))
}

#[derive(Deserialize, Validate)]
pub struct CreateTripRequest {
    pub user_id: i64,
    #[validate(length(min = 1))]
    pub title: String,
    pub start_date: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub daily_limit: f64,
}

async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>)> {
    body.validate()?;
    parse_iso_date(&body.start_date)?;

    state
        .db
        .get_user(body.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", body.user_id)))?;

    let trip = state
        .db
        .create_trip(body.user_id, &body.title, &body.start_date, body.daily_limit)
        .await?;

    tracing::info!(trip_id = trip.id, user_id = body.user_id, "Trip created");
    Ok((StatusCode::CREATED, Json(trip)))
}

#[derive(Deserialize)]
pub struct ReassignTripRequest {
    pub user_id: i64,
}

async fn reassign_trip(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<i64>,
    Json(body): Json<ReassignTripRequest>,
) -> Result<Json<Trip>> {
    state
        .db
        .get_user(body.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", body.user_id)))?;

    if !state.db.reassign_trip(trip_id, body.user_id).await? {
        return Err(AppError::NotFound(format!("Trip {trip_id} not found")));
    }

    let trip = state
        .db
        .get_trip(trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip {trip_id} not found")))?;

    tracing::info!(trip_id, user_id = body.user_id, "Trip reassigned");
    Ok(Json(trip))
}

// ─── Users ───────────────────────────────────────────────────

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    let users = state.db.list_users().await?;
    Ok(Json(users))
}

#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: Role,
    #[validate(length(min = 6))]
    pub password: String,
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    body.validate()?;

    let password_hash = hash_on_blocking_pool(body.password).await?;
    let user = state
        .db
        .create_user(&body.name, &body.email, body.role, &password_hash)
        .await?;

    tracing::info!(user_id = user.id, role = %user.role.as_str(), "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 6))]
    pub password: String,
}

async fn set_user_password(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(body): Json<SetPasswordRequest>,
) -> Result<StatusCode> {
    body.validate()?;

    let password_hash = hash_on_blocking_pool(body.password).await?;
    state.db.set_password(user_id, &password_hash).await?;

    tracing::info!(user_id, "Password reset by admin");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode> {
    if user_id == auth.user_id {
        return Err(AppError::BadRequest(
            "you cannot delete your own account".to_string(),
        ));
    }

    let target = state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    if target.role == Role::Admin && state.db.count_admins().await? <= 1 {
        return Err(AppError::Conflict(
            "cannot delete the last admin".to_string(),
        ));
    }

    if !state.db.delete_user(user_id).await? {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }

    tracing::info!(user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Deposits ────────────────────────────────────────────────

async fn list_deposits(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DepositWithNames>>> {
    let deposits = state.db.list_deposits_with_names().await?;
    Ok(Json(deposits))
}

#[derive(Deserialize)]
pub struct CreateDepositRequest {
    pub user_id: i64,
    pub trip_id: Option<i64>,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub note: String,
}

async fn create_deposit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateDepositRequest>,
) -> Result<(StatusCode, Json<Deposit>)> {
    parse_iso_date(&body.date)?;
    if !body.amount.is_finite() || body.amount <= 0.0 {
        return Err(AppError::BadRequest("amount must be positive".to_string()));
    }

    state
        .db
        .get_user(body.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", body.user_id)))?;

    if let Some(trip_id) = body.trip_id {
        state
            .db
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip {trip_id} not found")))?;
    }

    let deposit = state
        .db
        .create_deposit(
            body.user_id,
            body.trip_id,
            body.amount,
            &body.date,
            &body.note,
        )
        .await?;

    tracing::info!(
        deposit_id = deposit.id,
        user_id = body.user_id,
        amount = body.amount,
        "Deposit registered"
    );
    Ok((StatusCode::CREATED, Json(deposit)))
}

// ─── Expense approval ────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

async fn set_expense_status(
    State(state): State<Arc<AppState>>,
    Path(expense_id): Path<i64>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<Expense>> {
    let status: ExpenseStatus = body
        .status
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    if !state.db.set_expense_status(expense_id, status).await? {
        return Err(AppError::NotFound(format!(
            "Expense {expense_id} not found"
        )));
    }

    tracing::info!(expense_id, status = status.as_str(), "Expense status updated");

    let expense = state
        .db
        .get_expense(expense_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Expense {expense_id} not found")))?;
    Ok(Json(expense))
}
