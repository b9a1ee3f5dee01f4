//! Request handlers, grouped by resource.

mod auth;
mod expenses;
mod export;
mod stats;

pub use auth::{hash_password, login, me, signup};
pub use expenses::{
    create_expense, delete_expense, get_expense, list_expenses, update_expense,
};
pub use export::{export, report};
pub use stats::{stats, suggestions};

use chrono::Datelike;
use paisa_core::DateWindow;
use serde::Deserialize;

use crate::AppError;

/// Month/year query parameters shared by the stats, suggestions, report, and
/// export endpoints.
///
/// Kept as plain fields on each query struct (rather than `serde(flatten)`)
/// because urlencoded deserialization cannot flatten numeric fields.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Window for the requested period, or `None` when neither parameter is
/// given. Supplying only one of the two is rejected.
pub fn period_window(
    month: Option<u32>,
    year: Option<i32>,
) -> Result<Option<DateWindow>, AppError> {
    match (month, year) {
        (None, None) => Ok(None),
        (Some(month), Some(year)) => {
            validate_period(month, year)?;
            DateWindow::month(year, month)
                .map(Some)
                .ok_or_else(|| AppError::bad_request("invalid month/year"))
        }
        _ => Err(AppError::bad_request(
            "month and year must be supplied together",
        )),
    }
}

/// Like `period_window`, but defaults to the current calendar month.
pub fn period_window_or_current(
    month: Option<u32>,
    year: Option<i32>,
) -> Result<(i32, u32, DateWindow), AppError> {
    let today = chrono::Utc::now().date_naive();
    let (month, year) = match (month, year) {
        (None, None) => (today.month(), today.year()),
        (Some(month), Some(year)) => {
            validate_period(month, year)?;
            (month, year)
        }
        _ => {
            return Err(AppError::bad_request(
                "month and year must be supplied together",
            ))
        }
    };
    let window = DateWindow::month(year, month)
        .ok_or_else(|| AppError::bad_request("invalid month/year"))?;
    Ok((year, month, window))
}

fn validate_period(month: u32, year: i32) -> Result<(), AppError> {
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }
    if !(2000..=2100).contains(&year) {
        return Err(AppError::bad_request("year must be between 2000 and 2100"));
    }
    Ok(())
}
