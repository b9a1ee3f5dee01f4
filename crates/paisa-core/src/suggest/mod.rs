//! Budgeting suggestion engine
//!
//! Consumes the aggregator's per-category totals and produces a ranked list
//! of advisory messages from the static rule table. Three passes run in
//! order: ceiling warnings, category-specific tips, and the overall alert.
//! The warning and tip passes deliberately overlap - a category over its
//! ceiling can receive both - which is part of the observed contract.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::models::Category;
use crate::stats::CategoryTotal;

mod rules;
mod types;

pub use rules::{rule_for, BudgetRule, StaticTip, BUDGET_RULES, STATIC_TIPS};
pub use types::{Priority, Suggestion, SuggestionKind, SuggestionReport};

/// Recommended monthly budget, excluding rent
pub const RECOMMENDED_BUDGET: Decimal = dec!(8000);

/// Grand total above which the overall alert fires
const OVERALL_ALERT_THRESHOLD: Decimal = dec!(10000);

/// Warning priority escalates to high past this multiple of the ceiling
const HIGH_PRIORITY_FACTOR: Decimal = dec!(1.5);

/// Produce ranked budgeting suggestions from aggregated category totals
///
/// Total over its input domain: unknown category labels match no rule and
/// are skipped, an empty input yields an empty suggestion list, and nothing
/// here can fail or divide by zero. Inputs are never mutated, so identical
/// inputs always produce identical output.
pub fn advise(category_totals: &[CategoryTotal], grand_total: Decimal) -> SuggestionReport {
    let mut suggestions = Vec::new();

    // Pass 1: ceiling warnings
    for total in category_totals {
        let Ok(category) = Category::from_str(&total.category) else {
            continue;
        };
        let rule = rule_for(category);
        if rule.max_amount.is_zero() || total.total <= rule.max_amount {
            continue;
        }

        let priority = if total.total > rule.max_amount * HIGH_PRIORITY_FACTOR {
            Priority::High
        } else {
            Priority::Medium
        };

        suggestions.push(Suggestion {
            category: total.category.clone(),
            kind: SuggestionKind::Warning,
            message: format!(
                "You spent ₹{} on {}. Try to limit it to ₹{} per month.",
                total.total.round_dp(0),
                total.category,
                rule.max_amount
            ),
            priority,
            potential_savings: Some(total.total - rule.max_amount),
        });
    }

    // Pass 2: static tips, independent of pass 1 by design
    for tip in &STATIC_TIPS {
        let spent = category_totals
            .iter()
            .find(|t| t.category == tip.category.as_str())
            .map(|t| t.total)
            .unwrap_or(Decimal::ZERO);
        if spent > tip.threshold {
            suggestions.push(Suggestion {
                category: tip.category.as_str().to_string(),
                kind: SuggestionKind::Tip,
                message: tip.message.to_string(),
                priority: tip.priority,
                potential_savings: None,
            });
        }
    }

    // Pass 3: overall budget check
    if grand_total > OVERALL_ALERT_THRESHOLD {
        suggestions.push(Suggestion {
            category: "Overall".to_string(),
            kind: SuggestionKind::Alert,
            message: format!(
                "⚠️ Your total spending is ₹{}. For a college student, aim for ₹7000-8000/month (excluding rent).",
                grand_total.round_dp(0)
            ),
            priority: Priority::High,
            potential_savings: None,
        });
    }

    // Stable sort keeps generation order among equal priorities
    suggestions.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));

    SuggestionReport {
        suggestions,
        total_expenses: grand_total,
        recommended_budget: RECOMMENDED_BUDGET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(category: &str, amount: Decimal) -> CategoryTotal {
        CategoryTotal {
            category: category.to_string(),
            total: amount,
            count: 1,
            average: amount,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let report = advise(&[], Decimal::ZERO);
        assert!(report.suggestions.is_empty());
        assert_eq!(report.total_expenses, Decimal::ZERO);
        assert_eq!(report.recommended_budget, dec!(8000));
    }

    #[test]
    fn test_at_ceiling_does_not_warn() {
        let totals = vec![total("Transport", dec!(1500))];
        let report = advise(&totals, dec!(1500));
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_just_over_ceiling_warns_medium() {
        let totals = vec![total("Transport", dec!(1501))];
        let report = advise(&totals, dec!(1501));

        assert_eq!(report.suggestions.len(), 2); // warning + transport tip
        let warning = report
            .suggestions
            .iter()
            .find(|s| s.kind == SuggestionKind::Warning)
            .unwrap();
        assert_eq!(warning.priority, Priority::Medium);
        assert_eq!(warning.potential_savings, Some(dec!(1)));
        assert!(warning.message.contains("Transport"));
        assert!(warning.message.contains("₹1500"));
    }

    #[test]
    fn test_high_priority_boundary_is_strict() {
        // 6000 == 1.5 * 4000 exactly: not strictly greater, so medium
        let report = advise(&[total("Food & Snacks", dec!(6000))], dec!(6000));
        let warning = report
            .suggestions
            .iter()
            .find(|s| s.kind == SuggestionKind::Warning)
            .unwrap();
        assert_eq!(warning.priority, Priority::Medium);

        let report = advise(&[total("Food & Snacks", dec!(6001))], dec!(6001));
        let warning = report
            .suggestions
            .iter()
            .find(|s| s.kind == SuggestionKind::Warning)
            .unwrap();
        assert_eq!(warning.priority, Priority::High);
    }

    #[test]
    fn test_food_at_6000_gets_tip_then_warning() {
        // 6000 on food: one medium warning plus one high tip, no alert
        let report = advise(&[total("Food & Snacks", dec!(6000))], dec!(6000));

        assert_eq!(report.suggestions.len(), 2);
        assert_eq!(report.suggestions[0].kind, SuggestionKind::Tip);
        assert_eq!(report.suggestions[0].priority, Priority::High);
        assert_eq!(report.suggestions[1].kind, SuggestionKind::Warning);
        assert_eq!(report.suggestions[1].priority, Priority::Medium);
        assert_eq!(report.suggestions[1].potential_savings, Some(dec!(2000)));
    }

    #[test]
    fn test_warning_and_tip_duplication_is_preserved() {
        let report = advise(&[total("Recharge & Internet", dec!(2000))], dec!(2000));
        let kinds: Vec<SuggestionKind> = report.suggestions.iter().map(|s| s.kind).collect();
        assert!(kinds.contains(&SuggestionKind::Warning));
        assert!(kinds.contains(&SuggestionKind::Tip));
        assert!(report
            .suggestions
            .iter()
            .all(|s| s.category == "Recharge & Internet"));
    }

    #[test]
    fn test_hostel_rent_never_warns() {
        let report = advise(&[total("Hostel/Rent", dec!(9000))], dec!(9000));
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_overall_alert_boundary() {
        let report = advise(&[], dec!(10000));
        assert!(report.suggestions.is_empty());

        let report = advise(&[], dec!(12000));
        assert_eq!(report.suggestions.len(), 1);
        let alert = &report.suggestions[0];
        assert_eq!(alert.kind, SuggestionKind::Alert);
        assert_eq!(alert.priority, Priority::High);
        assert_eq!(alert.category, "Overall");
        assert!(alert.message.contains("₹12000"));
    }

    #[test]
    fn test_unknown_category_matches_no_rule() {
        let report = advise(&[total("Cigarettes", dec!(50000))], dec!(50000));
        // Only the overall alert, nothing category-specific
        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.suggestions[0].kind, SuggestionKind::Alert);
    }

    #[test]
    fn test_stable_sort_keeps_generation_order_on_ties() {
        // Two medium warnings: Transport before Shopping in input stays
        // Transport before Shopping in output
        let totals = vec![
            total("Transport", dec!(1600)),
            total("Shopping", dec!(1600)),
        ];
        let report = advise(&totals, dec!(3200));

        let mediums: Vec<&str> = report
            .suggestions
            .iter()
            .filter(|s| s.priority == Priority::Medium && s.kind == SuggestionKind::Warning)
            .map(|s| s.category.as_str())
            .collect();
        assert_eq!(mediums, ["Transport", "Shopping"]);
    }

    #[test]
    fn test_idempotent_for_identical_input() {
        let totals = vec![
            total("Food & Snacks", dec!(7000)),
            total("Transport", dec!(2000)),
        ];
        let a = advise(&totals, dec!(11000));
        let b = advise(&totals, dec!(11000));
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_full_ranking() {
        // Food 7000 -> high warning + high tip; Transport 1600 -> medium
        // warning + medium tip; Entertainment 1200 -> medium warning + low
        // tip; grand total 9800 -> no alert
        let totals = vec![
            total("Food & Snacks", dec!(7000)),
            total("Transport", dec!(1600)),
            total("Entertainment", dec!(1200)),
        ];
        let report = advise(&totals, dec!(9800));

        let weights: Vec<u8> = report
            .suggestions
            .iter()
            .map(|s| s.priority.weight())
            .collect();
        let mut sorted = weights.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(weights, sorted);
        assert_eq!(report.suggestions.len(), 6);
        assert_eq!(report.suggestions.last().unwrap().priority, Priority::Low);
    }
}
