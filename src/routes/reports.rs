// SPDX-License-Identifier: MIT

//! Admin expense reports with period and employee filters.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::models::ExpenseWithNames;
use crate::services::export::report_csv;
use crate::time_utils::resolve_period;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/reports", get(get_report))
        .route("/api/admin/reports.csv", get(get_report_csv))
}

/// Report filters: the shared period filters plus an optional employee.
#[derive(Deserialize)]
pub struct ReportQuery {
    #[serde(default = "default_scope")]
    pub scope: String,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub include_rejected: bool,
    pub user_id: Option<i64>,
}

fn default_scope() -> String {
    "month".to_string()
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub rows: Vec<ExpenseWithNames>,
    /// Sum of the listed amounts
    pub total: f64,
    pub start: Option<String>,
    pub end: Option<String>,
}

async fn fetch_rows(
    state: &AppState,
    query: &ReportQuery,
) -> Result<(Vec<ExpenseWithNames>, Option<(String, String)>)> {
    let period = resolve_period(&query.scope, query.start.as_deref(), query.end.as_deref())?;
    let rows = state
        .db
        .expense_report(period.clone(), query.user_id, query.include_rejected)
        .await?;
    Ok((rows, period))
}

/// Expense report rows, date ascending, with the filtered total.
async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>> {
    let (rows, period) = fetch_rows(&state, &query).await?;
    let total = rows.iter().map(|r| r.expense.amount).sum();

    let (start, end) = match period {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };

    Ok(Json(ReportResponse {
        rows,
        total,
        start,
        end,
    }))
}

/// The report as a CSV download.
async fn get_report_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    let (rows, _) = fetch_rows(&state, &query).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=expense_report.csv".to_string(),
            ),
        ],
        report_csv(&rows),
    ))
}
