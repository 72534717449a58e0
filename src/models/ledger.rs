// SPDX-License-Identifier: MIT

//! Balance and statement models.
//!
//! The statement is a unified ledger of deposits (positive amounts)
//! and expenses (negative amounts), the shape employees export as CSV.

use serde::Serialize;

use super::ExpenseStatus;

/// Aggregated totals for a user over a period.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Totals {
    pub deposits: f64,
    pub expenses: f64,
    /// deposits - expenses
    pub balance: f64,
}

/// Which side of the ledger a statement entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Deposit,
    Expense,
}

/// One line of the unified statement.
#[derive(Debug, Clone, Serialize)]
pub struct StatementEntry {
    /// ISO date
    pub date: String,
    pub kind: StatementKind,
    pub description: String,
    /// Trip title, or "—" when not tied to a trip
    pub trip: String,
    /// Approval status, expenses only
    pub status: Option<ExpenseStatus>,
    /// Signed amount: deposits positive, expenses negative
    pub amount: f64,
}

/// Per-user balance line on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct UserBalance {
    pub user_id: i64,
    pub name: String,
    /// Sum of the user's non-rejected expenses
    pub total_expenses: f64,
    /// Sum of all deposits made to the user
    pub total_deposits: f64,
    pub balance: f64,
}
