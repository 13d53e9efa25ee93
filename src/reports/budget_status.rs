//! Budget status
//!
//! Compares this month's spending per category against the configured
//! limits. The budgeting method only changes which extras are reported.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BudgetMethod, DateRange, Money, Transaction, DEFAULT_CATEGORIES};
use crate::storage::BudgetLimits;

/// Share of a limit above which a category is flagged as close to it
pub const WARNING_PERCENT: f64 = 80.0;

/// Spending against the limit of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatus {
    pub category: String,
    /// Expense this month, never negative
    pub spent: Money,
    /// Configured limit, zero when none
    pub limit: Money,
    /// `limit - spent`; negative when over
    pub remaining: Money,
    /// `spent / limit` as a percentage, zero without a limit
    pub percent_used: f64,
    /// A limit is set and spending exceeds it
    pub over_budget: bool,
}

impl CategoryStatus {
    /// Spending has passed [`WARNING_PERCENT`] of the limit
    pub fn near_limit(&self) -> bool {
        self.percent_used > WARNING_PERCENT
    }
}

/// Extra totals shown under the zero-based method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZeroBasedSummary {
    /// Income this month
    pub total_income: Money,
    /// Sum of every configured limit
    pub total_budgeted: Money,
    /// `total_income - total_budgeted`
    pub left_to_budget: Money,
}

/// Budget status for the month containing `today`
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub method: BudgetMethod,
    pub period: DateRange,
    pub categories: Vec<CategoryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_based: Option<ZeroBasedSummary>,
}

impl BudgetStatus {
    /// Generate the status of every known category
    ///
    /// Known categories are those of the whole history, sorted; a book with
    /// no transactions falls back to [`DEFAULT_CATEGORIES`] in their listed
    /// order.
    pub fn generate(
        transactions: &[Transaction],
        limits: &BudgetLimits,
        method: BudgetMethod,
        today: NaiveDate,
    ) -> Self {
        let period = DateRange::month_of(today);

        let history: BTreeSet<&str> = transactions.iter().map(|t| t.category.as_str()).collect();
        let universe: Vec<&str> = if history.is_empty() {
            DEFAULT_CATEGORIES.to_vec()
        } else {
            history.into_iter().collect()
        };

        let mut spent: HashMap<&str, Money> = HashMap::new();
        let mut total_income = Money::zero();
        for txn in transactions.iter().filter(|t| period.contains(t.date)) {
            if txn.is_expense() {
                *spent.entry(txn.category.as_str()).or_default() += txn.amount;
            } else if txn.is_income() {
                total_income += txn.amount;
            }
        }

        let categories = universe
            .into_iter()
            .map(|category| {
                let spent = spent.get(category).copied().unwrap_or_default();
                let limit = limits.limit_for(category);
                let percent_used = if limit.is_positive() {
                    spent.cents() as f64 / limit.cents() as f64 * 100.0
                } else {
                    0.0
                };
                CategoryStatus {
                    category: category.to_string(),
                    spent,
                    limit,
                    remaining: limit - spent,
                    percent_used,
                    over_budget: limit.is_positive() && spent > limit,
                }
            })
            .collect();

        let zero_based = (method == BudgetMethod::ZeroBased).then(|| {
            let total_budgeted = limits.total();
            ZeroBasedSummary {
                total_income,
                total_budgeted,
                left_to_budget: total_income - total_budgeted,
            }
        });

        Self {
            method,
            period,
            categories,
            zero_based,
        }
    }

    /// Status of one category
    pub fn category(&self, name: &str) -> Option<&CategoryStatus> {
        self.categories.iter().find(|c| c.category == name)
    }

    /// Categories whose spending exceeds their limit
    pub fn over_budget(&self) -> impl Iterator<Item = &CategoryStatus> {
        self.categories.iter().filter(|c| c.over_budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLimit, TransactionId, TransactionType, WalletId};
    use chrono::{TimeZone, Utc};

    fn txn(
        (y, m, d): (i32, u32, u32),
        cents: i64,
        kind: TransactionType,
        category: &str,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            wallet_id: WalletId::new(),
            destination_wallet_id: None,
            amount: Money::from_cents(cents),
            transaction_type: kind,
            category: category.into(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            member_id: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn test_defaults_when_no_history() {
        let status = BudgetStatus::generate(&[], &BudgetLimits::new(), BudgetMethod::Free, today());

        let names: Vec<_> = status.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["General", "Food", "Transport", "Utilities"]);
        assert!(status.categories.iter().all(|c| c.spent.is_zero()));
        assert!(status.zero_based.is_none());
    }

    #[test]
    fn test_only_current_month_expenses_count() {
        let transactions = vec![
            txn((2024, 3, 2), 4000, TransactionType::Expense, "Food"),
            txn((2024, 3, 19), 2500, TransactionType::Expense, "Food"),
            txn((2024, 2, 28), 9999, TransactionType::Expense, "Food"),
            txn((2023, 3, 10), 9999, TransactionType::Expense, "Food"),
            txn((2024, 3, 5), 7000, TransactionType::Income, "Food"),
        ];
        let limits =
            BudgetLimits::from_vec(vec![BudgetLimit::new("Food", Money::from_cents(6000))]);

        let status =
            BudgetStatus::generate(&transactions, &limits, BudgetMethod::Envelope, today());
        let food = status.category("Food").unwrap();

        assert_eq!(food.spent.cents(), 6500);
        assert_eq!(food.remaining.cents(), -500);
        assert!(food.over_budget);
        assert!(food.near_limit());
        assert_eq!(status.over_budget().count(), 1);
    }

    #[test]
    fn test_no_limit_is_never_over_budget() {
        let transactions = vec![txn((2024, 3, 2), 100, TransactionType::Expense, "Travel")];

        let status = BudgetStatus::generate(
            &transactions,
            &BudgetLimits::new(),
            BudgetMethod::Free,
            today(),
        );
        let travel = status.category("Travel").unwrap();

        assert!(!travel.over_budget);
        assert_eq!(travel.percent_used, 0.0);
        assert_eq!(travel.remaining.cents(), -100);
    }

    #[test]
    fn test_categories_come_from_whole_history() {
        let transactions = vec![
            txn((2022, 1, 1), 100, TransactionType::Expense, "Rent"),
            txn((2024, 3, 1), 100, TransactionType::Income, "Salary"),
        ];

        let status = BudgetStatus::generate(
            &transactions,
            &BudgetLimits::new(),
            BudgetMethod::Free,
            today(),
        );
        let names: Vec<_> = status.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["Rent", "Salary"]);
        assert!(status.category("Rent").unwrap().spent.is_zero());
    }

    #[test]
    fn test_zero_based_extras() {
        let transactions = vec![
            txn((2024, 3, 1), 300000, TransactionType::Income, "Salary"),
            txn((2024, 3, 3), 5000, TransactionType::Expense, "Food"),
        ];
        let limits = BudgetLimits::from_vec(vec![
            BudgetLimit::new("Food", Money::from_cents(50000)),
            BudgetLimit::new("Rent", Money::from_cents(150000)),
        ]);

        let status =
            BudgetStatus::generate(&transactions, &limits, BudgetMethod::ZeroBased, today());
        let extras = status.zero_based.unwrap();

        assert_eq!(extras.total_income.cents(), 300000);
        assert_eq!(extras.total_budgeted.cents(), 200000);
        assert_eq!(extras.left_to_budget.cents(), 100000);
    }
}
