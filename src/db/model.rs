// SPDX-License-Identifier: MIT

//! Database row types for Diesel.
//!
//! Rows mirror the SQLite schema (TEXT dates, REAL amounts); conversion
//! to the domain types in `crate::models` happens in the query modules.

use diesel::prelude::*;

use super::schema::{deposits, expenses, trips, users};

/// Database row for a user.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub bank_info: String,
}

/// Database row for a user (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub bank_info: String,
}

/// Database row for a trip.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = trips)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TripRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub daily_limit: f64,
    pub status: String,
}

/// Database row for a trip (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = trips)]
pub struct NewTripRow {
    pub user_id: i64,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub daily_limit: f64,
    pub status: String,
}

/// Database row for an expense.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseRow {
    pub id: i64,
    pub trip_id: i64,
    pub user_id: i64,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub receipt_path: String,
    pub status: String,
    pub created_at: String,
}

/// Database row for an expense (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = expenses)]
pub struct NewExpenseRow {
    pub trip_id: i64,
    pub user_id: i64,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub receipt_path: String,
    pub status: String,
    pub created_at: String,
}

/// Database row for a deposit.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = deposits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DepositRow {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: Option<i64>,
    pub amount: f64,
    pub date: String,
    pub note: String,
}

/// Database row for a deposit (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = deposits)]
pub struct NewDepositRow {
    pub user_id: i64,
    pub trip_id: Option<i64>,
    pub amount: f64,
    pub date: String,
    pub note: String,
}
