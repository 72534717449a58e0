// SPDX-License-Identifier: MIT

//! Trip Ledger: travel expense tracking for small teams
//!
//! This crate provides the backend API for recording business trips,
//! submitting expenses with receipts, registering deposits and keeping
//! a per-employee balance ledger.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::ReceiptStore;

pub use error::AppError;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub receipts: ReceiptStore,
}
