// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;

/// Maximum accepted request body size (receipt uploads), 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Path of the SQLite database file
    pub db_path: String,
    /// Directory where receipt uploads are stored
    pub upload_dir: String,
    /// JWT signing key for session tokens (raw bytes)
    pub secret_key: Vec<u8>,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Email of the admin account seeded on first startup
    pub admin_email: String,
    /// Initial password of the seeded admin account
    pub admin_password: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8000,
            db_path: ":memory:".to_string(),
            upload_dir: "uploads".to_string(),
            secret_key: b"test_secret_key_32_bytes_minimum".to_vec(),
            frontend_url: "http://localhost:5173".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables have defaults so the server starts with no
    /// configuration for local development; SECRET_KEY should be set
    /// for any real deployment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) => key.trim().to_string().into_bytes(),
            Err(_) => {
                tracing::warn!("SECRET_KEY not set, using development default");
                b"dev-secret-change-me".to_vec()
            }
        };

        Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            db_path: env::var("DB_PATH").unwrap_or_else(|_| "data/trip_ledger.db".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            secret_key,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            admin_email: env::var("ADMIN_EMAIL")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_else(|_| "admin@example.com".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}
