//! Budget limit model
//!
//! A budget limit caps monthly spending for one category. Categories are free
//! text taken from transactions, so limits are keyed by category name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Categories offered before any transaction exists
pub const DEFAULT_CATEGORIES: [&str; 4] = ["General", "Food", "Transport", "Utilities"];

/// Spending limit for a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    /// Category name
    pub category: String,

    /// Monthly limit
    pub limit: Money,
}

impl BudgetLimit {
    /// Create a new limit
    pub fn new(category: impl Into<String>, limit: Money) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }
}

/// How the budget screen summarises the same per-category numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetMethod {
    /// One envelope per category
    Envelope,
    /// Every unit of income is given a job
    ZeroBased,
    /// Limits are informational only
    #[default]
    Free,
    /// Focus on what is left in each category
    Remaining,
}

impl BudgetMethod {
    /// Parse a budget method from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "envelope" => Some(Self::Envelope),
            "zero_based" | "zerobased" | "zero" => Some(Self::ZeroBased),
            "free" => Some(Self::Free),
            "remaining" => Some(Self::Remaining),
            _ => None,
        }
    }
}

impl fmt::Display for BudgetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Envelope => write!(f, "Envelope"),
            Self::ZeroBased => write!(f, "Zero-based"),
            Self::Free => write!(f, "Free"),
            Self::Remaining => write!(f, "Remaining"),
        }
    }
}
