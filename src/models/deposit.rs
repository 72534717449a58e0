// SPDX-License-Identifier: MIT

//! Deposit model.

use serde::Serialize;

/// Money advanced to an employee, optionally tied to a trip.
#[derive(Debug, Clone, Serialize)]
pub struct Deposit {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: Option<i64>,
    pub amount: f64,
    /// ISO date
    pub date: String,
    pub note: String,
}

/// Deposit joined with user and trip names, for admin listings.
#[derive(Debug, Clone, Serialize)]
pub struct DepositWithNames {
    #[serde(flatten)]
    pub deposit: Deposit,
    pub user_name: String,
    /// Trip title, or "—" for deposits not tied to a trip
    pub trip_title: String,
}
