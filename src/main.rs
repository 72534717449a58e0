// SPDX-License-Identifier: MIT

//! Trip Ledger API Server
//!
//! Tracks business trips, expense submissions with receipts, deposits
//! and per-employee balances for a small team.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_ledger::{
    config::Config, db::Database, models::Role, services::password::hash_password,
    services::ReceiptStore, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(port = config.port, "Starting Trip Ledger API");

    // Make sure the data directory exists before SQLite opens the file
    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::open(&config.db_path).expect("Failed to open database");
    tracing::info!(path = %config.db_path, "Database ready");

    let receipts = ReceiptStore::new(&config.upload_dir).expect("Failed to create upload dir");
    tracing::info!(dir = %config.upload_dir, "Receipt store ready");

    seed_admin(&db, &config).await?;

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        receipts,
    });

    // Build router
    let app = trip_ledger::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the initial admin account unless it already exists.
async fn seed_admin(db: &Database, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if db.find_user_by_email(&config.admin_email).await?.is_some() {
        return Ok(());
    }

    let password = config.admin_password.clone();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let admin = db
        .create_user("Admin", &config.admin_email, Role::Admin, &hash)
        .await?;
    tracing::info!(user_id = admin.id, email = %config.admin_email, "Seeded admin account");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trip_ledger=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
