// SPDX-License-Identifier: MIT

//! Trip model.

use serde::Serialize;

/// A trip an employee books expenses against.
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    /// ISO date, YYYY-MM-DD
    pub start_date: String,
    /// Equal to start_date at creation; kept for historical data
    pub end_date: String,
    pub daily_limit: f64,
    pub status: String,
}

/// Trip with the running total of its non-rejected expenses.
#[derive(Debug, Clone, Serialize)]
pub struct TripWithTotal {
    #[serde(flatten)]
    pub trip: Trip,
    pub total_submitted: f64,
}

/// Trip with its owner's name, for admin listings.
#[derive(Debug, Clone, Serialize)]
pub struct TripWithOwner {
    #[serde(flatten)]
    pub trip: Trip,
    pub user_name: String,
}
