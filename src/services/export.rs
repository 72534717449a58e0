// SPDX-License-Identifier: MIT

//! CSV export builders for statements and expense reports.

use crate::models::{ExpenseWithNames, StatementEntry, StatementKind};

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn push_row(csv: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    csv.push_str(&row.join(","));
    csv.push('\n');
}

/// Render a user statement as CSV.
pub fn statement_csv(entries: &[StatementEntry]) -> String {
    let mut csv = String::from("Date,Type,Description,Trip,Status,Amount\n");
    for entry in entries {
        let kind = match entry.kind {
            StatementKind::Deposit => "deposit",
            StatementKind::Expense => "expense",
        };
        let status = entry.status.map(|s| s.as_str()).unwrap_or("");
        push_row(
            &mut csv,
            &[
                &entry.date,
                kind,
                &entry.description,
                &entry.trip,
                status,
                &format!("{:.2}", entry.amount),
            ],
        );
    }
    csv
}

/// Render the admin expense report as CSV. The receipt column carries
/// the stored filename only.
pub fn report_csv(rows: &[ExpenseWithNames]) -> String {
    let mut csv = String::from("Date,Employee,Trip,Category,Description,Status,Amount,Receipt\n");
    for row in rows {
        push_row(
            &mut csv,
            &[
                &row.expense.date,
                &row.user_name,
                &row.trip_title,
                &row.expense.category,
                &row.expense.description,
                row.expense.status.as_str(),
                &format!("{:.2}", row.expense.amount),
                row.expense.receipt.as_deref().unwrap_or(""),
            ],
        );
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseStatus;

    fn entry(amount: f64) -> StatementEntry {
        StatementEntry {
            date: "2026-03-02".to_string(),
            kind: StatementKind::Expense,
            description: "Meals • lunch, with client".to_string(),
            trip: "Client visit".to_string(),
            status: Some(ExpenseStatus::Approved),
            amount,
        }
    }

    #[test]
    fn test_statement_csv_shape() {
        let csv = statement_csv(&[entry(-45.5)]);
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "Date,Type,Description,Trip,Status,Amount");
        assert_eq!(
            lines.next().unwrap(),
            "2026-03-02,expense,\"Meals • lunch, with client\",Client visit,approved,-45.50"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_report_csv_empty_receipt() {
        let rows = vec![ExpenseWithNames {
            expense: crate::models::Expense {
                id: 1,
                trip_id: 1,
                user_id: 2,
                date: "2026-03-02".to_string(),
                category: "Transport".to_string(),
                description: String::new(),
                amount: 12.0,
                receipt: None,
                status: ExpenseStatus::Pending,
                created_at: "2026-03-02T10:00:00Z".to_string(),
            },
            user_name: "Ana".to_string(),
            trip_title: "Site survey".to_string(),
        }];

        let csv = report_csv(&rows);
        assert!(csv.ends_with("2026-03-02,Ana,Site survey,Transport,,pending,12.00,\n"));
    }
}
