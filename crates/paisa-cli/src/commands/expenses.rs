//! Expense commands (add, list)

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use paisa_core::{
    models::{Category, PaymentMode, User},
    Database, ExpenseFilter, NewExpense,
};

use super::resolve_period;

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    db: &Database,
    user: &User,
    description: &str,
    amount: &str,
    category: &str,
    date: Option<&str>,
    payment_mode: Option<&str>,
    notes: Option<String>,
) -> Result<()> {
    let amount: Decimal = amount
        .parse()
        .with_context(|| format!("Invalid amount '{}'", amount))?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than 0");
    }

    let category: Category = category.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let payment_mode: PaymentMode = match payment_mode {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => PaymentMode::default(),
    };
    let date = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid date format (use YYYY-MM-DD)")?,
        None => chrono::Utc::now().date_naive(),
    };

    let expense = db.insert_expense(
        user.id,
        &NewExpense {
            description: description.to_string(),
            amount,
            category,
            date,
            payment_mode,
            notes,
        },
    )?;

    println!(
        "✅ Recorded ₹{} on {} ({}, {})",
        expense.amount, expense.category, expense.date, expense.payment_mode
    );
    Ok(())
}

pub fn cmd_list(
    db: &Database,
    user: &User,
    month: Option<u32>,
    year: Option<i32>,
    category: Option<&str>,
    limit: i64,
) -> Result<()> {
    let window = resolve_period(month, year)?.map(|(_, _, w)| w);
    let category: Option<Category> = category
        .map(|s| s.parse().map_err(|e: String| anyhow::anyhow!(e)))
        .transpose()?;

    let filter = ExpenseFilter {
        window,
        category,
        limit: Some(limit),
        offset: None,
    };
    let expenses = db.list_expenses(user.id, &filter)?;

    if expenses.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!();
    println!(
        "   {:<5} {:<12} {:>10} {:<20} {:<12} {}",
        "ID", "Date", "Amount", "Category", "Mode", "Description"
    );
    println!("   {}", "─".repeat(90));
    let mut total = Decimal::ZERO;
    for e in &expenses {
        total += e.amount;
        println!(
            "   {:<5} {:<12} {:>10} {:<20} {:<12} {}",
            e.id,
            e.date.to_string(),
            format!("₹{}", e.amount),
            super::truncate(e.category.as_str(), 20),
            e.payment_mode.as_str(),
            super::truncate(&e.description, 30)
        );
    }
    println!("   {}", "─".repeat(90));
    println!("   {} expenses, ₹{} total", expenses.len(), total);
    println!();
    Ok(())
}
