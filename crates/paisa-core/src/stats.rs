//! Expense aggregation
//!
//! Groups expense records by category within an optional date window and
//! produces per-category totals plus a grand total. This is the single
//! source of truth for statistics: the API, the report renderer, and the
//! suggestion engine all consume its output rather than re-deriving sums.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Inclusive date window for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window covering a whole calendar month
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        }
        .pred_opt()?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A minimal expense record as seen by the aggregation engine
///
/// The category is a free label rather than the `Category` enum so that rows
/// written under an older vocabulary still aggregate; such labels count
/// toward the grand total but match no budget rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl From<&Expense> for ExpenseRecord {
    fn from(e: &Expense) -> Self {
        Self {
            category: e.category.as_str().to_string(),
            amount: e.amount,
            date: e.date,
        }
    }
}

/// Aggregated figures for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: i64,
    pub average: Decimal,
}

/// Aggregation result over a set of expense records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseStatistics {
    /// Per-category figures, sorted by total descending
    pub category_totals: Vec<CategoryTotal>,
    /// Sum of all aggregated amounts; zero when nothing matched
    pub grand_total: Decimal,
}

impl ExpenseStatistics {
    /// Percentage of the grand total spent in `category`, 0 when the grand
    /// total is zero
    pub fn percentage_of_total(&self, total: Decimal) -> Decimal {
        if self.grand_total.is_zero() {
            Decimal::ZERO
        } else {
            (total / self.grand_total * Decimal::ONE_HUNDRED).round_dp(1)
        }
    }
}

/// Aggregate expense records by category
///
/// Records outside `window` (inclusive on both ends) are ignored; `None`
/// aggregates everything. Records with a negative amount are skipped -
/// the validation layer never produces them, and a corrupt row must not
/// poison the totals. Categories with no matching records are absent from
/// the output rather than reported as zero.
///
/// Ties in the descending-by-total sort keep first-seen input order, so the
/// result is deterministic for identical input.
pub fn aggregate(records: &[ExpenseRecord], window: Option<DateWindow>) -> ExpenseStatistics {
    let mut groups: Vec<CategoryTotal> = Vec::new();

    for record in records {
        if let Some(w) = window {
            if !w.contains(record.date) {
                continue;
            }
        }
        if record.amount < Decimal::ZERO {
            tracing::warn!(
                category = %record.category,
                amount = %record.amount,
                "Skipping negative-amount record during aggregation"
            );
            continue;
        }

        match groups.iter_mut().find(|g| g.category == record.category) {
            Some(group) => {
                group.total += record.amount;
                group.count += 1;
            }
            None => groups.push(CategoryTotal {
                category: record.category.clone(),
                total: record.amount,
                count: 1,
                average: Decimal::ZERO,
            }),
        }
    }

    for group in &mut groups {
        group.average = (group.total / Decimal::from(group.count)).round_dp(2);
    }

    let grand_total: Decimal = groups.iter().map(|g| g.total).sum();

    // Stable sort: equal totals keep first-seen order
    groups.sort_by(|a, b| b.total.cmp(&a.total));

    ExpenseStatistics {
        category_totals: groups,
        grand_total,
    }
}
