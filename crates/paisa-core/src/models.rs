//! Domain models for Paisa

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense categories
///
/// This vocabulary is shared between the persistence schema, the validation
/// layer, and the budget rule table. Changing it requires updating the rule
/// table in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Snacks")]
    FoodAndSnacks,
    Transport,
    #[serde(rename = "Study Materials")]
    StudyMaterials,
    Entertainment,
    Shopping,
    #[serde(rename = "Recharge & Internet")]
    RechargeAndInternet,
    #[serde(rename = "Hostel/Rent")]
    HostelRent,
    Medical,
    Grooming,
    Others,
}

impl Category {
    /// All known categories, in display order
    pub const ALL: [Category; 10] = [
        Category::FoodAndSnacks,
        Category::Transport,
        Category::StudyMaterials,
        Category::Entertainment,
        Category::Shopping,
        Category::RechargeAndInternet,
        Category::HostelRent,
        Category::Medical,
        Category::Grooming,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndSnacks => "Food & Snacks",
            Self::Transport => "Transport",
            Self::StudyMaterials => "Study Materials",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::RechargeAndInternet => "Recharge & Internet",
            Self::HostelRent => "Hostel/Rent",
            Self::Medical => "Medical",
            Self::Grooming => "Grooming",
            Self::Others => "Others",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Food & Snacks" => Ok(Self::FoodAndSnacks),
            "Transport" => Ok(Self::Transport),
            "Study Materials" => Ok(Self::StudyMaterials),
            "Entertainment" => Ok(Self::Entertainment),
            "Shopping" => Ok(Self::Shopping),
            "Recharge & Internet" => Ok(Self::RechargeAndInternet),
            "Hostel/Rent" => Ok(Self::HostelRent),
            "Medical" => Ok(Self::Medical),
            "Grooming" => Ok(Self::Grooming),
            "Others" => Ok(Self::Others),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMode {
    Cash,
    #[default]
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Net Banking")]
    NetBanking,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Cash,
        PaymentMode::Upi,
        PaymentMode::Card,
        PaymentMode::NetBanking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::NetBanking => "Net Banking",
        }
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(Self::Cash),
            "UPI" => Ok(Self::Upi),
            "Card" => Ok(Self::Card),
            "Net Banking" => Ok(Self::NetBanking),
            _ => Err(format!("Unknown payment mode: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Owner of this expense
    pub user_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub payment_mode: PaymentMode,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    pub notes: Option<String>,
}

/// Partial update of an existing expense; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExpense {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub payment_mode: Option<PaymentMode>,
    pub notes: Option<String>,
}

/// A registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2id hash, never serialized in API responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_str(cat.as_str()).unwrap(), cat);
        }
        assert!(Category::from_str("Groceries").is_err());
    }

    #[test]
    fn test_category_serde_uses_display_labels() {
        let json = serde_json::to_string(&Category::FoodAndSnacks).unwrap();
        assert_eq!(json, "\"Food & Snacks\"");
        let cat: Category = serde_json::from_str("\"Recharge & Internet\"").unwrap();
        assert_eq!(cat, Category::RechargeAndInternet);
    }

    #[test]
    fn test_payment_mode_default_is_upi() {
        assert_eq!(PaymentMode::default(), PaymentMode::Upi);
        assert_eq!(PaymentMode::from_str("Net Banking").unwrap(), PaymentMode::NetBanking);
    }
}
