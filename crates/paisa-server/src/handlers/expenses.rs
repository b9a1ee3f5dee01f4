//! Expense CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use paisa_core::{models::Category, ExpenseFilter, NewExpense, UpdateExpense};

use super::period_window;
use crate::{AppError, AppState, AuthUser};

const DESCRIPTION_MIN: usize = 3;
const DESCRIPTION_MAX: usize = 200;
const NOTES_MAX: usize = 500;

fn validate_description(description: &str) -> Result<(), AppError> {
    let len = description.trim().chars().count();
    if !(DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&len) {
        return Err(AppError::bad_request(format!(
            "description must be between {DESCRIPTION_MIN} and {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::bad_request("amount must be greater than 0"));
    }
    Ok(())
}

fn validate_notes(notes: Option<&str>) -> Result<(), AppError> {
    if let Some(notes) = notes {
        if notes.chars().count() > NOTES_MAX {
            return Err(AppError::bad_request(format!(
                "notes must be at most {NOTES_MAX} characters"
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub category: Option<Category>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /api/expenses`
pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, AppError> {
    let filter = ExpenseFilter {
        window: period_window(query.month, query.year)?,
        category: query.category,
        limit: query.limit,
        offset: query.offset,
    };
    let expenses = state.db.list_expenses(auth.id, &filter)?;
    Ok(Json(json!({ "count": expenses.len(), "expenses": expenses })))
}

/// `POST /api/expenses`
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(new): Json<NewExpense>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    validate_description(&new.description)?;
    validate_amount(new.amount)?;
    validate_notes(new.notes.as_deref())?;

    let expense = state.db.insert_expense(auth.id, &new)?;
    tracing::debug!(expense_id = expense.id, "expense created");
    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({ "expense": expense })),
    ))
}

/// `GET /api/expenses/:id`
pub async fn get_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let expense = state
        .db
        .get_expense(auth.id, id)?
        .ok_or_else(|| AppError::not_found("expense not found"))?;
    Ok(Json(json!({ "expense": expense })))
}

/// `PUT /api/expenses/:id`
pub async fn update_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateExpense>,
) -> Result<Json<Value>, AppError> {
    if let Some(description) = update.description.as_deref() {
        validate_description(description)?;
    }
    if let Some(amount) = update.amount {
        validate_amount(amount)?;
    }
    validate_notes(update.notes.as_deref())?;

    let expense = state.db.update_expense(auth.id, id, &update)?;
    Ok(Json(json!({ "expense": expense })))
}

/// `DELETE /api/expenses/:id`
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    state.db.delete_expense(auth.id, id)?;
    Ok(Json(json!({ "deleted": id })))
}
