//! Core types for the suggestion engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// A category ceiling was exceeded
    Warning,
    /// A category-specific saving tip was triggered
    Tip,
    /// Overall spending crossed the monthly alert threshold
    Alert,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Warning => "warning",
            SuggestionKind::Tip => "tip",
            SuggestionKind::Alert => "alert",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SuggestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(SuggestionKind::Warning),
            "tip" => Ok(SuggestionKind::Tip),
            "alert" => Ok(SuggestionKind::Alert),
            _ => Err(format!("Unknown suggestion kind: {}", s)),
        }
    }
}

/// How urgent a suggestion is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Numeric weight for sorting (higher = more urgent)
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A single budgeting suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Category label, or "Overall" for the grand-total alert
    pub category: String,
    pub kind: SuggestionKind,
    pub message: String,
    pub priority: Priority,
    /// Amount over the ceiling, present on ceiling warnings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<Decimal>,
}

/// The full output of the suggestion engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionReport {
    /// Ranked by priority weight descending; ties keep generation order
    pub suggestions: Vec<Suggestion>,
    pub total_expenses: Decimal,
    /// Fixed recommended monthly budget
    pub recommended_budget: Decimal,
}
