//! Monthly report rendering
//!
//! Produces the downloadable plain-text monthly report: summary, category
//! breakdown, transaction detail, and the suggestion list. All figures come
//! from the aggregator and suggestion engine outputs - nothing here
//! recomputes totals.

use std::fmt::Write;

use crate::models::Expense;
use crate::stats::ExpenseStatistics;
use crate::suggest::SuggestionReport;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Human-readable month name, falling back to the number if out of range
pub fn month_name(month: u32) -> String {
    (month as usize)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i))
        .map(|s| s.to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Render the monthly expense report as plain text
///
/// `expenses` must already be scoped to the report month; `stats` and
/// `suggestions` are the engine outputs for the same rows.
pub fn render_monthly_report(
    year: i32,
    month: u32,
    expenses: &[Expense],
    stats: &ExpenseStatistics,
    suggestions: &SuggestionReport,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Expense Report - {} {}", month_name(month), year);
    let _ = writeln!(out, "{}", "=".repeat(40));
    let _ = writeln!(out);

    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "-------");
    let _ = writeln!(out, "Total Expenses: ₹{}", stats.grand_total.round_dp(2));
    let _ = writeln!(out, "Total Transactions: {}", expenses.len());
    let _ = writeln!(out);

    let _ = writeln!(out, "Category-wise Spending");
    let _ = writeln!(out, "----------------------");
    if stats.category_totals.is_empty() {
        let _ = writeln!(out, "No expenses recorded this month.");
    }
    for cat in &stats.category_totals {
        let _ = writeln!(
            out,
            "{}: ₹{} ({}%) - {} transactions",
            cat.category,
            cat.total.round_dp(2),
            stats.percentage_of_total(cat.total),
            cat.count
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Detailed Transactions");
    let _ = writeln!(out, "---------------------");
    for expense in expenses {
        let _ = writeln!(
            out,
            "{} - {}: ₹{} - {}",
            expense.date,
            expense.category,
            expense.amount.round_dp(2),
            expense.description
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Savings Suggestions");
    let _ = writeln!(out, "-------------------");
    if suggestions.suggestions.is_empty() {
        let _ = writeln!(out, "You're within the recommended budget. Keep it up!");
    }
    for suggestion in &suggestions.suggestions {
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            suggestion.priority, suggestion.category, suggestion.message
        );
    }
    let _ = writeln!(
        out,
        "\nRecommended monthly budget (excluding rent): ₹{}",
        suggestions.recommended_budget
    );

    out
}
