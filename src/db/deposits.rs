// SPDX-License-Identifier: MIT

//! Deposit operations.

use diesel::prelude::*;

use super::model::{DepositRow, NewDepositRow};
use super::schema::{deposits, trips, users};
use super::{db_err, last_insert_rowid, Database};
use crate::error::AppError;
use crate::models::{Deposit, DepositWithNames};

pub(crate) fn deposit_from_row(row: DepositRow) -> Deposit {
    Deposit {
        id: row.id,
        user_id: row.user_id,
        trip_id: row.trip_id,
        amount: row.amount,
        date: row.date,
        note: row.note,
    }
}

impl Database {
    /// Deposits tied to a trip for its owner, most recent date first.
    pub async fn list_deposits_for_trip(
        &self,
        trip_id: i64,
        user_id: i64,
    ) -> Result<Vec<Deposit>, AppError> {
        self.run(move |conn| {
            let rows: Vec<DepositRow> = deposits::table
                .filter(deposits::trip_id.eq(trip_id))
                .filter(deposits::user_id.eq(user_id))
                .order(deposits::date.desc())
                .load(conn)
                .map_err(db_err)?;
            Ok(rows.into_iter().map(deposit_from_row).collect())
        })
        .await
    }

    /// Register a deposit to a user, optionally tied to a trip.
    pub async fn create_deposit(
        &self,
        user_id: i64,
        trip_id: Option<i64>,
        amount: f64,
        date: &str,
        note: &str,
    ) -> Result<Deposit, AppError> {
        let new_row = NewDepositRow {
            user_id,
            trip_id,
            amount,
            date: date.to_string(),
            note: note.to_string(),
        };
        self.run(move |conn| {
            diesel::insert_into(deposits::table)
                .values(&new_row)
                .execute(conn)
                .map_err(db_err)?;
            let id: i64 = diesel::select(last_insert_rowid())
                .get_result(conn)
                .map_err(db_err)?;
            let row: DepositRow = deposits::table.find(id).first(conn).map_err(db_err)?;
            Ok(deposit_from_row(row))
        })
        .await
    }

    /// All deposits with user and trip names, newest first (admin
    /// listing). Deposits without a trip show "—".
    pub async fn list_deposits_with_names(&self) -> Result<Vec<DepositWithNames>, AppError> {
        self.run(|conn| {
            let rows: Vec<(DepositRow, String, Option<String>)> = deposits::table
                .inner_join(users::table)
                .left_join(trips::table)
                .select((DepositRow::as_select(), users::name, trips::title.nullable()))
                .order((deposits::date.desc(), deposits::id.desc()))
                .load(conn)
                .map_err(db_err)?;

            Ok(rows
                .into_iter()
                .map(|(row, user_name, trip_title)| DepositWithNames {
                    deposit: deposit_from_row(row),
                    user_name,
                    trip_title: trip_title.unwrap_or_else(|| "—".to_string()),
                })
                .collect())
        })
        .await
    }
}
