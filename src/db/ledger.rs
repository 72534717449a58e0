// SPDX-License-Identifier: MIT

//! Balance, statement and report queries.
//!
//! Rejected expenses never count toward totals unless explicitly
//! requested; balance is always deposits minus expenses.

use diesel::dsl::sum;
use diesel::prelude::*;

use super::expenses::expense_from_row;
use super::model::{DepositRow, ExpenseRow};
use super::schema::{deposits, expenses, trips, users};
use super::{db_err, Database};
use crate::error::AppError;
use crate::models::{ExpenseWithNames, StatementEntry, StatementKind, Totals, UserBalance};

/// Date period as a pair of inclusive ISO date bounds.
pub type Period = Option<(String, String)>;

fn deposit_sum_on(
    conn: &mut SqliteConnection,
    user_id: i64,
    period: &Period,
) -> Result<f64, AppError> {
    let mut query = deposits::table
        .select(sum(deposits::amount))
        .filter(deposits::user_id.eq(user_id))
        .into_boxed();
    if let Some((start, end)) = period {
        query = query.filter(deposits::date.between(start.clone(), end.clone()));
    }
    let total: Option<f64> = query.first(conn).map_err(db_err)?;
    Ok(total.unwrap_or(0.0))
}

fn expense_sum_on(
    conn: &mut SqliteConnection,
    user_id: i64,
    period: &Period,
    include_rejected: bool,
) -> Result<f64, AppError> {
    let mut query = expenses::table
        .select(sum(expenses::amount))
        .filter(expenses::user_id.eq(user_id))
        .into_boxed();
    if let Some((start, end)) = period {
        query = query.filter(expenses::date.between(start.clone(), end.clone()));
    }
    if !include_rejected {
        query = query.filter(expenses::status.ne("rejected"));
    }
    let total: Option<f64> = query.first(conn).map_err(db_err)?;
    Ok(total.unwrap_or(0.0))
}

fn totals_on(
    conn: &mut SqliteConnection,
    user_id: i64,
    period: &Period,
    include_rejected: bool,
) -> Result<Totals, AppError> {
    let deposits = deposit_sum_on(conn, user_id, period)?;
    let expenses = expense_sum_on(conn, user_id, period, include_rejected)?;
    Ok(Totals {
        deposits,
        expenses,
        balance: deposits - expenses,
    })
}

impl Database {
    /// Deposit/expense totals for a user over a period.
    pub async fn user_totals(
        &self,
        user_id: i64,
        period: Period,
        include_rejected: bool,
    ) -> Result<Totals, AppError> {
        self.run(move |conn| totals_on(conn, user_id, &period, include_rejected))
            .await
    }

    /// Unified statement: the user's deposits and expenses as one
    /// chronological ledger. Deposits carry positive amounts, expenses
    /// negative ones; on the same date expenses sort first.
    pub async fn user_statement(
        &self,
        user_id: i64,
        period: Period,
        include_rejected: bool,
    ) -> Result<Vec<StatementEntry>, AppError> {
        self.run(move |conn| {
            let mut dep_query = deposits::table
                .left_join(trips::table)
                .select((DepositRow::as_select(), trips::title.nullable()))
                .filter(deposits::user_id.eq(user_id))
                .into_boxed();
            if let Some((start, end)) = &period {
                dep_query = dep_query.filter(deposits::date.between(start.clone(), end.clone()));
            }
            let dep_rows: Vec<(DepositRow, Option<String>)> =
                dep_query.load(conn).map_err(db_err)?;

            let mut exp_query = expenses::table
                .inner_join(trips::table)
                .select((ExpenseRow::as_select(), trips::title))
                .filter(expenses::user_id.eq(user_id))
                .into_boxed();
            if let Some((start, end)) = &period {
                exp_query = exp_query.filter(expenses::date.between(start.clone(), end.clone()));
            }
            if !include_rejected {
                exp_query = exp_query.filter(expenses::status.ne("rejected"));
            }
            let exp_rows: Vec<(ExpenseRow, String)> = exp_query.load(conn).map_err(db_err)?;

            let mut entries: Vec<StatementEntry> =
                Vec::with_capacity(dep_rows.len() + exp_rows.len());

            for (row, trip_title) in dep_rows {
                entries.push(StatementEntry {
                    date: row.date,
                    kind: StatementKind::Deposit,
                    description: row.note,
                    trip: trip_title.unwrap_or_else(|| "—".to_string()),
                    status: None,
                    amount: row.amount,
                });
            }

            for (row, trip_title) in exp_rows {
                let expense = expense_from_row(row)?;
                let description = if expense.description.is_empty() {
                    expense.category.clone()
                } else {
                    format!("{} • {}", expense.category, expense.description)
                };
                entries.push(StatementEntry {
                    date: expense.date,
                    kind: StatementKind::Expense,
                    description,
                    trip: trip_title,
                    status: Some(expense.status),
                    amount: -expense.amount,
                });
            }

            entries.sort_by(|a, b| {
                let rank = |kind: StatementKind| match kind {
                    StatementKind::Expense => 0,
                    StatementKind::Deposit => 1,
                };
                a.date
                    .cmp(&b.date)
                    .then_with(|| rank(a.kind).cmp(&rank(b.kind)))
            });

            Ok(entries)
        })
        .await
    }

    /// Per-user balances across all time, ordered by name (admin
    /// dashboard summary).
    pub async fn user_balances(&self) -> Result<Vec<UserBalance>, AppError> {
        self.run(|conn| {
            let rows: Vec<(i64, String)> = users::table
                .select((users::id, users::name))
                .order(users::name.asc())
                .load(conn)
                .map_err(db_err)?;

            rows.into_iter()
                .map(|(user_id, name)| {
                    let totals = totals_on(conn, user_id, &None, false)?;
                    Ok(UserBalance {
                        user_id,
                        name,
                        total_expenses: totals.expenses,
                        total_deposits: totals.deposits,
                        balance: totals.balance,
                    })
                })
                .collect()
        })
        .await
    }

    /// Expense report rows for the admin, date ascending.
    pub async fn expense_report(
        &self,
        period: Period,
        user_id: Option<i64>,
        include_rejected: bool,
    ) -> Result<Vec<ExpenseWithNames>, AppError> {
        self.run(move |conn| {
            let mut query = expenses::table
                .inner_join(users::table)
                .inner_join(trips::table)
                .select((ExpenseRow::as_select(), users::name, trips::title))
                .order(expenses::date.asc())
                .into_boxed();
            if let Some((start, end)) = &period {
                query = query.filter(expenses::date.between(start.clone(), end.clone()));
            }
            if !include_rejected {
                query = query.filter(expenses::status.ne("rejected"));
            }
            if let Some(user_id) = user_id {
                query = query.filter(expenses::user_id.eq(user_id));
            }

            let rows: Vec<(ExpenseRow, String, String)> = query.load(conn).map_err(db_err)?;

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
