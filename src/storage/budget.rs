//! Budget limit set
//!
//! At most one limit per category; setting a limit replaces the previous one
//! and no history is kept.

use crate::models::{BudgetLimit, Money};

/// Configured category limits
#[derive(Debug, Clone, Default)]
pub struct BudgetLimits {
    limits: Vec<BudgetLimit>,
}

impl BudgetLimits {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted limits, keeping the last entry per category
    pub fn from_vec(limits: Vec<BudgetLimit>) -> Self {
        let mut set = Self::new();
        for limit in limits {
            set.upsert(limit);
        }
        set
    }

    /// Replace any limit for the same category
    pub fn upsert(&mut self, limit: BudgetLimit) -> Option<BudgetLimit> {
        let previous = self
            .limits
            .iter()
            .position(|l| l.category == limit.category)
            .map(|index| self.limits.remove(index));
        self.limits.push(limit);
        previous
    }

    /// Limit for a category, zero when none is configured
    pub fn limit_for(&self, category: &str) -> Money {
        self.limits
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.limit)
            .unwrap_or_default()
    }

    /// Sum of every configured limit
    pub fn total(&self) -> Money {
        self.limits.iter().map(|l| l.limit).sum()
    }

    /// All limits
    pub fn all(&self) -> &[BudgetLimit] {
        &self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces() {
        let mut limits = BudgetLimits::new();
        assert!(limits
            .upsert(BudgetLimit::new("Food", Money::from_cents(10000)))
            .is_none());

        let previous = limits.upsert(BudgetLimit::new("Food", Money::from_cents(15000)));
        assert_eq!(previous.map(|l| l.limit.cents()), Some(10000));
        assert_eq!(limits.all().len(), 1);
        assert_eq!(limits.limit_for("Food").cents(), 15000);
    }

    #[test]
    fn test_missing_category_is_zero() {
        let limits = BudgetLimits::new();
        assert!(limits.limit_for("Travel").is_zero());
    }

    #[test]
    fn test_from_vec_dedupes_and_totals() {
        let limits = BudgetLimits::from_vec(vec![
            BudgetLimit::new("Food", Money::from_cents(100)),
            BudgetLimit::new("Transport", Money::from_cents(50)),
            BudgetLimit::new("Food", Money::from_cents(200)),
        ]);
        assert_eq!(limits.all().len(), 2);
        assert_eq!(limits.total().cents(), 250);
    }
}
