//! Monthly report and raw-data export endpoints.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    Extension,
};
use serde::Deserialize;

use paisa_core::{
    advise, aggregate,
    export::{to_csv_string, to_json_string, ExportFormat},
    report::{month_name, render_monthly_report},
    ExpenseFilter, ExpenseRecord,
};

use super::{period_window, period_window_or_current, PeriodQuery};
use crate::{AppError, AppState, AuthUser};

fn attachment_headers(content_type: &'static str, filename: String) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\"")) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    headers
}

/// `GET /api/expenses/report?month&year`
///
/// Plain-text monthly report: summary, category breakdown, transactions,
/// and savings suggestions. Defaults to the current month.
pub async fn report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<(HeaderMap, String), AppError> {
    let (year, month, window) = period_window_or_current(query.month, query.year)?;

    let filter = ExpenseFilter {
        window: Some(window),
        ..Default::default()
    };
    let expenses = state.db.list_expenses(auth.id, &filter)?;
    let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();
    let stats = aggregate(&records, None);
    let suggestions = advise(&stats.category_totals, stats.grand_total);

    let body = render_monthly_report(year, month, &expenses, &stats, &suggestions);
    let filename = format!(
        "expense-report-{}-{}.txt",
        month_name(month).to_lowercase(),
        year
    );
    Ok((attachment_headers("text/plain; charset=utf-8", filename), body))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// `csv` (default) or `json`
    pub format: Option<String>,
}

/// `GET /api/expenses/export?month&year&format`
pub async fn export(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ExportQuery>,
) -> Result<(HeaderMap, String), AppError> {
    let filter = ExpenseFilter {
        window: period_window(query.month, query.year)?,
        ..Default::default()
    };
    let expenses = state.db.list_expenses(auth.id, &filter)?;

    let format: ExportFormat = query
        .format
        .as_deref()
        .unwrap_or("csv")
        .parse()
        .map_err(AppError::bad_request)?;

    match format {
        ExportFormat::Csv => {
            let body = to_csv_string(&expenses)?;
            Ok((
                attachment_headers("text/csv; charset=utf-8", "expenses.csv".to_string()),
                body,
            ))
        }
        ExportFormat::Json => {
            let body = to_json_string(&expenses)?;
            Ok((
                attachment_headers("application/json", "expenses.json".to_string()),
                body,
            ))
        }
    }
}
