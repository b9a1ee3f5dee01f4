//! Static budget rule table
//!
//! Monthly spend ceilings per category, tuned for Indian college students
//! (amounts in INR). The same table drives two independent passes: the
//! ceiling-warning check and the static tip check. A ceiling of zero means
//! the category (Hostel/Rent) is treated as fixed and never checked.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::Priority;
use crate::models::Category;

/// Recommended monthly spend ceiling for one category
#[derive(Debug, Clone, Copy)]
pub struct BudgetRule {
    pub category: Category,
    /// Ceiling above which a warning fires; zero = excluded from checks
    pub max_amount: Decimal,
    /// Informational share of an ideal budget, in percent
    pub expected_percentage: u8,
}

pub const BUDGET_RULES: [BudgetRule; 10] = [
    BudgetRule {
        category: Category::FoodAndSnacks,
        max_amount: dec!(4000),
        expected_percentage: 30,
    },
    BudgetRule {
        category: Category::Transport,
        max_amount: dec!(1500),
        expected_percentage: 15,
    },
    BudgetRule {
        category: Category::StudyMaterials,
        max_amount: dec!(1000),
        expected_percentage: 10,
    },
    BudgetRule {
        category: Category::Entertainment,
        max_amount: dec!(1000),
        expected_percentage: 10,
    },
    BudgetRule {
        category: Category::Shopping,
        max_amount: dec!(1500),
        expected_percentage: 10,
    },
    BudgetRule {
        category: Category::RechargeAndInternet,
        max_amount: dec!(800),
        expected_percentage: 8,
    },
    BudgetRule {
        category: Category::HostelRent,
        max_amount: dec!(0),
        expected_percentage: 0,
    },
    BudgetRule {
        category: Category::Medical,
        max_amount: dec!(500),
        expected_percentage: 5,
    },
    BudgetRule {
        category: Category::Grooming,
        max_amount: dec!(700),
        expected_percentage: 7,
    },
    BudgetRule {
        category: Category::Others,
        max_amount: dec!(500),
        expected_percentage: 5,
    },
];

/// Look up the budget rule for a category
pub fn rule_for(category: Category) -> &'static BudgetRule {
    // The table covers every Category variant
    BUDGET_RULES
        .iter()
        .find(|r| r.category == category)
        .unwrap_or(&BUDGET_RULES[9])
}

/// A fixed advisory tip, triggered when its category crosses the threshold
#[derive(Debug, Clone, Copy)]
pub struct StaticTip {
    pub category: Category,
    /// Trigger threshold; matches the category's ceiling
    pub threshold: Decimal,
    pub priority: Priority,
    pub message: &'static str,
}

pub const STATIC_TIPS: [StaticTip; 4] = [
    StaticTip {
        category: Category::FoodAndSnacks,
        threshold: dec!(4000),
        priority: Priority::High,
        message: "💡 Consider getting a monthly mess subscription or cook simple meals to save ₹1000-2000/month.",
    },
    StaticTip {
        category: Category::Transport,
        threshold: dec!(1500),
        priority: Priority::Medium,
        message: "💡 Try using college bus, shared auto, or bicycle to save on transport. Potential savings: ₹500-800/month.",
    },
    StaticTip {
        category: Category::Entertainment,
        threshold: dec!(1000),
        priority: Priority::Low,
        message: "💡 Use student discounts on OTT platforms, attend free college events, and split subscription costs with friends.",
    },
    StaticTip {
        category: Category::RechargeAndInternet,
        threshold: dec!(800),
        priority: Priority::Medium,
        message: "💡 Switch to student plans from Jio/Airtel (₹200-300/month) and use college WiFi when possible.",
    },
];
