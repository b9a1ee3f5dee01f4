//! Statistics and savings-suggestion endpoints.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde_json::{json, Value};

use paisa_core::{aggregate, advise, ExpenseFilter, ExpenseRecord};

use super::{period_window, period_window_or_current, PeriodQuery};
use crate::{AppError, AppState, AuthUser};

/// `GET /api/expenses/stats?month&year`
///
/// Without a period, aggregates the user's entire history.
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Value>, AppError> {
    let window = period_window(query.month, query.year)?;
    let expenses = state.db.list_expenses(auth.id, &ExpenseFilter::default())?;
    let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();
    let stats = aggregate(&records, window);
    Ok(Json(json!({ "stats": stats })))
}

/// `GET /api/expenses/suggestions?month&year`
///
/// Defaults to the current calendar month.
pub async fn suggestions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Value>, AppError> {
    let (year, month, window) = period_window_or_current(query.month, query.year)?;
    let expenses = state.db.list_expenses(auth.id, &ExpenseFilter::default())?;
    let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();
    let stats = aggregate(&records, Some(window));
    let report = advise(&stats.category_totals, stats.grand_total);
    Ok(Json(json!({ "month": month, "year": year, "report": report })))
}
