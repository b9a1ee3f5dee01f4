//! Statistics, suggestions, report, and export commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use paisa_core::{
    advise, aggregate,
    export::{to_csv_string, to_json_string, ExportFormat},
    models::User,
    report::{month_name, render_monthly_report},
    suggest::Priority,
    Database, ExpenseFilter, ExpenseRecord,
};

use super::{resolve_period, resolve_period_or_current};

pub fn cmd_stats(db: &Database, user: &User, month: Option<u32>, year: Option<i32>) -> Result<()> {
    let period = resolve_period(month, year)?;
    let expenses = db.list_expenses(user.id, &ExpenseFilter::default())?;
    let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();
    let stats = aggregate(&records, period.map(|(_, _, w)| w));

    match period {
        Some((y, m, _)) => println!("\n📊 Spending for {} {}", month_name(m), y),
        None => println!("\n📊 Spending, all time"),
    }

    if stats.category_totals.is_empty() {
        println!("   No expenses recorded.");
        println!();
        return Ok(());
    }

    println!();
    println!(
        "   {:<22} {:>10} {:>7} {:>10} {:>7}",
        "Category", "Total", "Count", "Average", "Share"
    );
    println!("   {}", "─".repeat(62));
    for ct in &stats.category_totals {
        println!(
            "   {:<22} {:>10} {:>7} {:>10} {:>6}%",
            super::truncate(&ct.category, 22),
            format!("₹{}", ct.total),
            ct.count,
            format!("₹{}", ct.average),
            stats.percentage_of_total(ct.total)
        );
    }
    println!("   {}", "─".repeat(62));
    println!("   Grand total: ₹{}", stats.grand_total);
    println!();
    Ok(())
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
    }
}

pub fn cmd_suggest(
    db: &Database,
    user: &User,
    month: Option<u32>,
    year: Option<i32>,
) -> Result<()> {
    let (y, m, window) = resolve_period_or_current(month, year)?;

    let expenses = db.list_expenses(user.id, &ExpenseFilter::default())?;
    let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();
    let stats = aggregate(&records, Some(window));
    let report = advise(&stats.category_totals, stats.grand_total);

    println!("\n💰 Savings suggestions for {} {}", month_name(m), y);
    println!("   Total spent: ₹{}", report.total_expenses);
    println!("   Recommended budget: ₹{}", report.recommended_budget);
    println!();

    if report.suggestions.is_empty() {
        println!("   Nothing to flag. Spending looks healthy!");
    } else {
        for s in &report.suggestions {
            println!("   {} {}", priority_marker(s.priority), s.message);
            if let Some(savings) = s.potential_savings {
                println!("      Potential savings: ₹{}", savings);
            }
        }
    }
    println!();
    Ok(())
}

pub fn cmd_report(
    db: &Database,
    user: &User,
    month: Option<u32>,
    year: Option<i32>,
    output: Option<&Path>,
) -> Result<()> {
    let (y, m, window) = resolve_period_or_current(month, year)?;

    let filter = ExpenseFilter {
        window: Some(window),
        ..Default::default()
    };
    let expenses = db.list_expenses(user.id, &filter)?;
    let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();
    let stats = aggregate(&records, None);
    let suggestions = advise(&stats.category_totals, stats.grand_total);

    let text = render_monthly_report(y, m, &expenses, &stats, &suggestions);
    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✅ Report written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

pub fn cmd_export(
    db: &Database,
    user: &User,
    format: &str,
    output: Option<&Path>,
    month: Option<u32>,
    year: Option<i32>,
) -> Result<()> {
    let filter = ExpenseFilter {
        window: resolve_period(month, year)?.map(|(_, _, w)| w),
        ..Default::default()
    };
    let expenses = db.list_expenses(user.id, &filter)?;

    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let body = match format {
        ExportFormat::Csv => to_csv_string(&expenses)?,
        ExportFormat::Json => to_json_string(&expenses)?,
    };

    match output {
        Some(path) => {
            fs::write(path, &body)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            println!("✅ Exported {} expenses to {}", expenses.len(), path.display());
        }
        None => print!("{}", body),
    }
    Ok(())
}
