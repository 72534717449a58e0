// SPDX-License-Identifier: MIT

//! Database layer (SQLite via Diesel).
//!
//! `Database` exposes typed async operations grouped by entity:
//! - Users (accounts, credentials)
//! - Trips
//! - Expenses (submission, approval)
//! - Deposits
//! - Ledger (totals, unified statement, admin report)
//!
//! Diesel work is blocking, so every operation runs on the tokio
//! blocking pool via [`Database::run`].

pub mod connection;
pub mod model;
pub mod schema;

mod deposits;
mod expenses;
mod ledger;
mod trips;
mod users;

pub use connection::{create_pool, run_migrations, DbPool};
pub use expenses::NewExpense;
pub use ledger::Period;

use diesel::SqliteConnection;

use crate::error::AppError;

diesel::define_sql_function! {
    /// SQLite's rowid of the most recent successful INSERT.
    fn last_insert_rowid() -> BigInt;
}

/// Map a Diesel error to an opaque database error.
pub(crate) fn db_err(e: diesel::result::Error) -> AppError {
    AppError::Database(e.to_string())
}

/// Database handle. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the database at `db_path` and bring the schema up to date.
    pub fn open(db_path: &str) -> Result<Self, AppError> {
        let pool = connection::create_pool(db_path)?;
        connection::run_migrations(&pool)?;
        Ok(Self::new(pool))
    }

    /// Run blocking Diesel work on the blocking thread pool.
    async fn run<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| AppError::Database(e.to_string()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking task failed: {e}")))?
    }
}
