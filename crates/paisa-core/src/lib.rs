//! Paisa Core Library
//!
//! Shared functionality for the Paisa student expense tracker:
//! - Database access and migrations
//! - Expense and user domain models
//! - Expense aggregation (per-category totals, grand total)
//! - Rule-based budgeting suggestion engine
//! - CSV/JSON export and monthly report rendering

pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod report;
pub mod stats;
pub mod suggest;

pub use db::{Database, ExpenseFilter};
pub use error::{Error, Result};
pub use models::{Category, Expense, NewExpense, PaymentMode, UpdateExpense, User};
pub use stats::{aggregate, CategoryTotal, DateWindow, ExpenseRecord, ExpenseStatistics};
pub use suggest::{advise, Priority, Suggestion, SuggestionKind, SuggestionReport};
