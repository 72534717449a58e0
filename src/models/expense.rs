// SPDX-License-Identifier: MIT

//! Expense model.

use serde::{Deserialize, Serialize};

/// Approval state of a submitted expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Approved => "approved",
            ExpenseStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ExpenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ExpenseStatus::Pending),
            "approved" => Ok(ExpenseStatus::Approved),
            "rejected" => Ok(ExpenseStatus::Rejected),
            other => Err(format!("unknown expense status '{other}'")),
        }
    }
}

/// An expense submitted against a trip.
#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub id: i64,
    pub trip_id: i64,
    pub user_id: i64,
    /// ISO date the expense was incurred
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    /// Stored receipt filename, if a receipt was uploaded
    pub receipt: Option<String>,
    pub status: ExpenseStatus,
    /// RFC3339 submission timestamp
    pub created_at: String,
}

/// Expense joined with its submitter and trip, for admin views.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseWithNames {
    #[serde(flatten)]
    pub expense: Expense,
    pub user_name: String,
    pub trip_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "pending".parse::<ExpenseStatus>().unwrap(),
            ExpenseStatus::Pending
        );
        assert!("aprovado".parse::<ExpenseStatus>().is_err());
    }
}
