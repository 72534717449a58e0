// SPDX-License-Identifier: MIT

//! Expense operations.

use diesel::prelude::*;

use super::model::{ExpenseRow, NewExpenseRow};
use super::schema::{expenses, trips, users};
use super::{db_err, last_insert_rowid, Database};
use crate::error::AppError;
use crate::models::{Expense, ExpenseStatus, ExpenseWithNames};

pub(crate) fn expense_from_row(row: ExpenseRow) -> Result<Expense, AppError> {
    let status: ExpenseStatus = row
        .status
        .parse()
        .map_err(|e: String| AppError::Database(e))?;
    Ok(Expense {
        id: row.id,
        trip_id: row.trip_id,
        user_id: row.user_id,
        date: row.date,
        category: row.category,
        description: row.description,
        amount: row.amount,
        receipt: if row.receipt_path.is_empty() {
            None
        } else {
            Some(row.receipt_path)
        },
        status,
        created_at: row.created_at,
    })
}

/// Fields of a new expense submission.
pub struct NewExpense {
    pub trip_id: i64,
    pub user_id: i64,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    /// Stored receipt filename, empty when no receipt was uploaded
    pub receipt: Option<String>,
    pub created_at: String,
}

impl Database {
    /// Get an expense by id.
    pub async fn get_expense(&self, expense_id: i64) -> Result<Option<Expense>, AppError> {
        self.run(move |conn| {
            let row: Option<ExpenseRow> = expenses::table
                .find(expense_id)
                .first(conn)
                .optional()
                .map_err(db_err)?;
            row.map(expense_from_row).transpose()
        })
        .await
    }

    /// A user's expenses, newest first.
    pub async fn list_expenses_for_user(&self, user_id: i64) -> Result<Vec<Expense>, AppError> {
        self.run(move |conn| {
            let rows: Vec<ExpenseRow> = expenses::table
                .filter(expenses::user_id.eq(user_id))
                .order(expenses::id.desc())
                .load(conn)
                .map_err(db_err)?;
            rows.into_iter().map(expense_from_row).collect()
        })
        .await
    }

    /// A trip's expenses, newest first.
    pub async fn list_expenses_for_trip(&self, trip_id: i64) -> Result<Vec<Expense>, AppError> {
        self.run(move |conn| {
            let rows: Vec<ExpenseRow> = expenses::table
                .filter(expenses::trip_id.eq(trip_id))
                .order(expenses::id.desc())
                .load(conn)
                .map_err(db_err)?;
            rows.into_iter().map(expense_from_row).collect()
        })
        .await
    }

    /// Record a new expense, always pending approval.
    pub async fn create_expense(&self, new: NewExpense) -> Result<Expense, AppError> {
        let new_row = NewExpenseRow {
            trip_id: new.trip_id,
            user_id: new.user_id,
            date: new.date,
            category: new.category,
            description: new.description,
            amount: new.amount,
            receipt_path: new.receipt.unwrap_or_default(),
            status: ExpenseStatus::Pending.as_str().to_string(),
            created_at: new.created_at,
        };
        self.run(move |conn| {
            diesel::insert_into(expenses::table)
                .values(&new_row)
                .execute(conn)
                .map_err(db_err)?;
            let id: i64 = diesel::select(last_insert_rowid())
                .get_result(conn)
                .map_err(db_err)?;
            let row: ExpenseRow = expenses::table.find(id).first(conn).map_err(db_err)?;
            expense_from_row(row)
        })
        .await
    }

    /// Set the approval status of an expense.
    pub async fn set_expense_status(
        &self,
        expense_id: i64,
        status: ExpenseStatus,
    ) -> Result<bool, AppError> {
        self.run(move |conn| {
            diesel::update(expenses::table.find(expense_id))
                .set(expenses::status.eq(status.as_str()))
                .execute(conn)
                .map(|n| n > 0)
                .map_err(db_err)
        })
        .await
    }

    /// All pending expenses with submitter and trip names, oldest
    /// first so the approval queue is FIFO.
    pub async fn pending_expenses(&self) -> Result<Vec<ExpenseWithNames>, AppError> {
        self.run(|conn| {
            let rows: Vec<(ExpenseRow, String, String)> = expenses::table
                .inner_join(users::table)
                .inner_join(trips::table)
                .filter(expenses::status.eq("pending"))
                .select((ExpenseRow::as_select(), users::name, trips::title))
                .order(expenses::created_at.asc())
                .load(conn)
                .map_err(db_err)?;

            rows.into_iter()
                .map(|(row, user_name, trip_title)| {
                    Ok(ExpenseWithNames {
                        expense: expense_from_row(row)?,
                        user_name,
                        trip_title,
                    })
                })
                .collect()
        })
        .await
    }
}
