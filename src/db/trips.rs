// SPDX-License-Identifier: MIT

//! Trip operations.

use diesel::dsl::sum;
use diesel::prelude::*;

use super::model::{NewTripRow, TripRow};
use super::schema::{expenses, trips, users};
use super::{db_err, last_insert_rowid, Database};
use crate::error::AppError;
use crate::models::{Trip, TripWithOwner, TripWithTotal};

pub(crate) fn trip_from_row(row: TripRow) -> Trip {
    Trip {
        id: row.id,
        user_id: row.user_id,
        title: row.title,
        start_date: row.start_date,
        end_date: row.end_date,
        daily_limit: row.daily_limit,
        status: row.status,
    }
}

/// Sum of a trip's non-rejected expenses.
fn trip_total_on(conn: &mut SqliteConnection, trip_id: i64) -> Result<f64, AppError> {
    let total: Option<f64> = expenses::table
        .filter(expenses::trip_id.eq(trip_id))
        .filter(expenses::status.ne("rejected"))
        .select(sum(expenses::amount))
        .first(conn)
        .map_err(db_err)?;
    Ok(total.unwrap_or(0.0))
}

impl Database {
    /// Get a trip by id.
    pub async fn get_trip(&self, trip_id: i64) -> Result<Option<Trip>, AppError> {
        self.run(move |conn| {
            let row: Option<TripRow> = trips::table
                .find(trip_id)
                .first(conn)
                .optional()
                .map_err(db_err)?;
            Ok(row.map(trip_from_row))
        })
        .await
    }

    /// A user's trips, newest first, each with its non-rejected total.
    pub async fn list_trips_for_user(&self, user_id: i64) -> Result<Vec<TripWithTotal>, AppError> {
        self.run(move |conn| {
            let rows: Vec<TripRow> = trips::table
                .filter(trips::user_id.eq(user_id))
                .order(trips::id.desc())
                .load(conn)
                .map_err(db_err)?;

            rows.into_iter()
                .map(|row| {
                    let total_submitted = trip_total_on(conn, row.id)?;
                    Ok(TripWithTotal {
                        trip: trip_from_row(row),
                        total_submitted,
                    })
                })
                .collect()
        })
        .await
    }

    /// All trips with owner names, newest first (admin listing).
    pub async fn list_trips_with_owners(&self) -> Result<Vec<TripWithOwner>, AppError> {
        self.run(|conn| {
            let rows: Vec<(TripRow, String)> = trips::table
                .inner_join(users::table)
                .select((TripRow::as_select(), users::name))
                .order(trips::id.desc())
                .load(conn)
                .map_err(db_err)?;

            Ok(rows
                .into_iter()
                .map(|(row, user_name)| TripWithOwner {
                    trip: trip_from_row(row),
                    user_name,
                })
                .collect())
        })
        .await
    }

    /// Create a trip. The end date always equals the start date; trips
    /// are recorded as single-day entries.
    pub async fn create_trip(
        &self,
        user_id: i64,
        title: &str,
        start_date: &str,
        daily_limit: f64,
    ) -> Result<Trip, AppError> {
        let new_row = NewTripRow {
            user_id,
            title: title.to_string(),
            start_date: start_date.to_string(),
            end_date: start_date.to_string(),
            daily_limit,
            status: "open".to_string(),
        };
        self.run(move |conn| {
            diesel::insert_into(trips::table)
                .values(&new_row)
                .execute(conn)
                .map_err(db_err)?;
            let id: i64 = diesel::select(last_insert_rowid())
                .get_result(conn)
                .map_err(db_err)?;
            let row: TripRow = trips::table.find(id).first(conn).map_err(db_err)?;
            Ok(trip_from_row(row))
        })
        .await
    }

    /// Move a trip to another user.
    pub async fn reassign_trip(&self, trip_id: i64, user_id: i64) -> Result<bool, AppError> {
        self.run(move |conn| {
            diesel::update(trips::table.find(trip_id))
                .set(trips::user_id.eq(user_id))
                .execute(conn)
                .map(|n| n > 0)
                .map_err(db_err)
        })
        .await
    }

    /// Sum of a trip's non-rejected expenses.
    pub async fn trip_total(&self, trip_id: i64) -> Result<f64, AppError> {
        self.run(move |conn| trip_total_on(conn, trip_id)).await
    }
}
