// SPDX-License-Identifier: MIT

//! Expense submission and receipt serving.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

use crate::db::NewExpense;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Expense;
use crate::time_utils::{format_utc_rfc3339, parse_iso_date};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/expenses", get(list_expenses).post(create_expense))
        .route("/uploads/{filename}", get(serve_receipt))
}

/// The current user's expenses, newest first.
async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Expense>>> {
    let expenses = state.db.list_expenses_for_user(auth.user_id).await?;
    Ok(Json(expenses))
}

#[derive(Default)]
struct ExpenseForm {
    trip_id: Option<i64>,
    date: Option<String>,
    category: Option<String>,
    description: String,
    amount: Option<f64>,
    receipt: Option<(String, Vec<u8>)>,
}

async fn read_expense_form(mut multipart: Multipart) -> Result<ExpenseForm> {
    let mut form = ExpenseForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "receipt" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
                // An empty file input still submits a part with no name
                if !filename.is_empty() && !bytes.is_empty() {
                    form.receipt = Some((filename, bytes.to_vec()));
                }
            }
            other => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read field: {e}")))?;
                match other {
                    "trip_id" => {
                        form.trip_id = Some(value.parse().map_err(|_| {
                            AppError::BadRequest("trip_id must be an integer".to_string())
                        })?);
                    }
                    "date" => form.date = Some(value),
                    "category" => form.category = Some(value),
                    "description" => form.description = value.trim().to_string(),
                    "amount" => {
                        form.amount = Some(value.parse().map_err(|_| {
                            AppError::BadRequest("amount must be a number".to_string())
                        })?);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

fn require_field<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| AppError::BadRequest(format!("missing field '{name}'")))
}

/// Submit an expense against one of the user's trips. Multipart form
/// with fields trip_id, date, category, description, amount and an
/// optional receipt file.
async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Expense>)> {
    let form = read_expense_form(multipart).await?;

    let trip_id = require_field(form.trip_id, "trip_id")?;
    let date = require_field(form.date, "date")?;
    let category = require_field(form.category, "category")?;
    let amount = require_field(form.amount, "amount")?;

    parse_iso_date(&date)?;
    if category.trim().is_empty() {
        return Err(AppError::BadRequest("category must not be empty".to_string()));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::BadRequest("amount must be positive".to_string()));
    }

    let trip = state
        .db
        .get_trip(trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip {trip_id} not found")))?;
    if trip.user_id != auth.user_id {
        return Err(AppError::Forbidden);
    }

    let receipt = match form.receipt {
        Some((filename, bytes)) => Some(state.receipts.save(&filename, bytes).await?),
        None => None,
    };

    let expense = state
        .db
        .create_expense(NewExpense {
            trip_id,
            user_id: auth.user_id,
            date,
            category: category.trim().to_string(),
            description: form.description,
            amount,
            receipt,
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        })
        .await?;

    tracing::info!(
        expense_id = expense.id,
        trip_id,
        user_id = auth.user_id,
        "Expense submitted"
    );

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Serve a stored receipt file to any authenticated user.
async fn serve_receipt(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse> {
    let (bytes, content_type) = state.receipts.read(&filename).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}
