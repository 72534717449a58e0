// SPDX-License-Identifier: MIT

//! Trip routes for employees.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Deposit, Expense, Trip, TripWithTotal};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trips", get(list_trips))
        .route("/api/trips/{id}", get(get_trip))
}

/// The current user's trips, newest first, with submitted totals.
async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<TripWithTotal>>> {
    let trips = state.db.list_trips_for_user(auth.user_id).await?;
    Ok(Json(trips))
}

#[derive(Serialize)]
pub struct TripDetail {
    #[serde(flatten)]
    pub trip: Trip,
    pub owner_name: String,
    /// Sum of the trip's non-rejected expenses
    pub total_submitted: f64,
    pub expenses: Vec<Expense>,
    pub deposits: Vec<Deposit>,
}

/// One trip with its expenses and deposits. Employees can only see
/// their own trips; admins can see any.
async fn get_trip(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(trip_id): Path<i64>,
) -> Result<Json<TripDetail>> {
    let trip = state
        .db
        .get_trip(trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip {trip_id} not found")))?;

    if trip.user_id != auth.user_id && !auth.is_admin() {
        return Err(AppError::Forbidden);
    }

    let owner = state
        .db
        .get_user(trip.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", trip.user_id)))?;

    let expenses = state.db.list_expenses_for_trip(trip_id).await?;
    let deposits = state.db.list_deposits_for_trip(trip_id, trip.user_id).await?;
    let total_submitted = state.db.trip_total(trip_id).await?;

    Ok(Json(TripDetail {
        trip,
        owner_name: owner.name,
        total_submitted,
        expenses,
        deposits,
    }))
}
