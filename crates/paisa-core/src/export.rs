//! Expense export in CSV and JSON formats

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::models::Expense;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (use csv or json)", s)),
        }
    }
}

/// Flattened expense row for export
#[derive(Debug, Clone, Serialize)]
struct ExpenseRow<'a> {
    date: String,
    category: &'a str,
    description: &'a str,
    amount: String,
    payment_mode: &'a str,
    notes: &'a str,
}

impl<'a> From<&'a Expense> for ExpenseRow<'a> {
    fn from(e: &'a Expense) -> Self {
        Self {
            date: e.date.to_string(),
            category: e.category.as_str(),
            description: &e.description,
            amount: e.amount.to_string(),
            payment_mode: e.payment_mode.as_str(),
            notes: e.notes.as_deref().unwrap_or(""),
        }
    }
}

/// Write expenses as CSV with a header row
pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for expense in expenses {
        csv_writer.serialize(ExpenseRow::from(expense))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render expenses as a CSV string
pub fn to_csv_string(expenses: &[Expense]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(expenses, &mut buf)?;
    // csv output is valid UTF-8 by construction
    Ok(String::from_utf8(buf).unwrap_or_default())
}

/// Render expenses as pretty-printed JSON
pub fn to_json_string(expenses: &[Expense]) -> Result<String> {
    Ok(serde_json::to_string_pretty(expenses)?)
}
