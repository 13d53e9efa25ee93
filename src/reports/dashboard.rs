//! Dashboard Summary
//!
//! Per-currency balance and flow totals for a date range, plus the expense
//! breakdown by category and a daily income/expense series. Amounts in
//! different currencies are never added together.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DateRange, Money, Transaction, TransactionType, Wallet, WalletId};

/// Number of transactions kept in [`DashboardSummary::recent`]
pub const RECENT_LIMIT: usize = 5;

/// Totals for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyTotals {
    pub currency: String,
    /// Sum of current wallet balances, regardless of the range
    pub balance: Money,
    /// Income in range against wallets of this currency
    pub income: Money,
    /// Expense in range against wallets of this currency
    pub expense: Money,
}

/// Expense total of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Money,
}

/// Income and expense of one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub income: Money,
    pub expense: Money,
}

/// Dashboard Summary
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub range: DateRange,
    /// One row per currency, sorted by code
    pub currencies: Vec<CurrencyTotals>,
    /// Expense by category, largest first
    pub categories: Vec<CategoryAmount>,
    /// Days with at least one transaction, oldest first
    pub daily: Vec<DailyPoint>,
    /// Newest transactions in range
    pub recent: Vec<Transaction>,
}

impl DashboardSummary {
    /// Generate the summary for `range` (inclusive)
    pub fn generate(wallets: &[Wallet], transactions: &[Transaction], range: DateRange) -> Self {
        let mut in_range: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| range.contains(t.date))
            .collect();
        in_range.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            currencies: currency_totals(wallets, &in_range),
            categories: expense_by_category(&in_range),
            daily: daily_series(&in_range),
            recent: in_range.iter().take(RECENT_LIMIT).map(|&t| t.clone()).collect(),
            range,
        }
    }

    /// Totals for one currency code
    pub fn currency(&self, code: &str) -> Option<&CurrencyTotals> {
        self.currencies.iter().find(|c| c.currency == code)
    }
}

fn currency_totals(wallets: &[Wallet], transactions: &[&Transaction]) -> Vec<CurrencyTotals> {
    let mut totals: BTreeMap<&str, CurrencyTotals> = BTreeMap::new();

    for wallet in wallets {
        totals
            .entry(wallet.currency.as_str())
            .or_insert_with(|| CurrencyTotals {
                currency: wallet.currency.clone(),
                balance: Money::zero(),
                income: Money::zero(),
                expense: Money::zero(),
            })
            .balance += wallet.balance;
    }

    let currency_of: HashMap<WalletId, &str> = wallets
        .iter()
        .map(|w| (w.id, w.currency.as_str()))
        .collect();

    for txn in transactions {
        // Transactions against a vanished wallet have no currency to land in
        let Some(row) = currency_of
            .get(&txn.wallet_id)
            .and_then(|code| totals.get_mut(code))
        else {
            continue;
        };
        match txn.transaction_type {
            TransactionType::Income => row.income += txn.amount,
            TransactionType::Expense => row.expense += txn.amount,
            TransactionType::Transfer => {}
        }
    }

    totals.into_values().collect()
}

fn expense_by_category(transactions: &[&Transaction]) -> Vec<CategoryAmount> {
    let mut by_category: HashMap<&str, Money> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *by_category.entry(txn.category.as_str()).or_default() += txn.amount;
    }

    let mut categories: Vec<CategoryAmount> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.to_string(),
            amount,
        })
        .collect();
    categories.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    categories
}

fn daily_series(transactions: &[&Transaction]) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();
    for txn in transactions {
        let point = days.entry(txn.day()).or_insert_with(|| DailyPoint {
            date: txn.day(),
            income: Money::zero(),
            expense: Money::zero(),
        });
        match txn.transaction_type {
            TransactionType::Income => point.income += txn.amount,
            TransactionType::Expense => point.expense += txn.amount,
            TransactionType::Transfer => {}
        }
    }
    days.into_values().collect()
}
