// SPDX-License-Identifier: MIT

//! Shared helpers for dates and reporting periods.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

use crate::error::{AppError, Result};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an ISO `YYYY-MM-DD` date, rejecting anything else.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{raw}': expected YYYY-MM-DD")))
}

/// Resolve the reporting period from `scope`/`start`/`end` filters.
///
/// `scope=all` means no period filter. Otherwise missing bounds default
/// to the current month to date: first day of the month through today.
pub fn resolve_period(
    scope: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<(String, String)>> {
    if scope == "all" {
        return Ok(None);
    }

    let today = Utc::now().date_naive();
    let start = match start {
        Some(raw) if !raw.is_empty() => parse_iso_date(raw)?,
        _ => today.with_day(1).unwrap_or(today),
    };
    let end = match end {
        Some(raw) if !raw.is_empty() => parse_iso_date(raw)?,
        _ => today,
    };

    Ok(Some((start.to_string(), end.to_string())))
}
