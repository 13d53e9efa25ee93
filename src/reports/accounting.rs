//! Accounting Report
//!
//! Buckets transactions by calendar day, month or year and folds income,
//! expense and a transaction count per bucket.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Granularity, Money, Transaction, TransactionType};

/// One period of the accounting report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountingRow {
    /// Sortable period key (`YYYY-MM-DD`, `YYYY-MM` or `YYYY`)
    pub key: String,
    /// Human label derived from the key
    pub display: String,
    pub income: Money,
    pub expense: Money,
    /// `income - expense`
    pub net: Money,
    /// Transactions in the period, transfers included
    pub count: usize,
}

/// Accounting report, newest period first
#[derive(Debug, Clone, Serialize)]
pub struct AccountingReport {
    pub granularity: Granularity,
    pub rows: Vec<AccountingRow>,
}

#[derive(Default)]
struct Bucket {
    income: Money,
    expense: Money,
    count: usize,
}

impl AccountingReport {
    /// Generate the report over `transactions`
    ///
    /// Only periods that contain at least one transaction appear.
    pub fn generate(transactions: &[Transaction], granularity: Granularity) -> Self {
        let mut buckets: HashMap<String, Bucket> = HashMap::new();

        for txn in transactions {
            let bucket = buckets.entry(granularity.key(txn.day())).or_default();
            match txn.transaction_type {
                TransactionType::Income => bucket.income += txn.amount,
                TransactionType::Expense => bucket.expense += txn.amount,
                TransactionType::Transfer => {}
            }
            bucket.count += 1;
        }

        let mut rows: Vec<AccountingRow> = buckets
            .into_iter()
            .map(|(key, bucket)| AccountingRow {
                display: granularity
                    .display_label(&key)
                    .unwrap_or_else(|| key.clone()),
                income: bucket.income,
                expense: bucket.expense,
                net: bucket.income - bucket.expense,
                count: bucket.count,
                key,
            })
            .collect();

        // Keys are zero-padded, so string order is chronological order
        rows.sort_by(|a, b| b.key.cmp(&a.key));

        Self { granularity, rows }
    }

    /// Sum of income over all rows
    pub fn total_income(&self) -> Money {
        self.rows.iter().map(|r| r.income).sum()
    }

    /// Sum of expense over all rows
    pub fn total_expense(&self) -> Money {
        self.rows.iter().map(|r| r.expense).sum()
    }

    /// Sum of net over all rows
    pub fn total_net(&self) -> Money {
        self.rows.iter().map(|r| r.net).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Accounting Report ({})\n", self.granularity));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12} {:>8}\n",
            "Period", "Income", "Expense", "Net Result", "Count"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No transactions recorded.\n");
            return output;
        }

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>12} {:>8}\n",
                row.display,
                row.income.to_string(),
                row.expense.to_string(),
                row.net.to_string(),
                row.count
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12} {:>8}\n",
            "TOTAL",
            self.total_income().to_string(),
            self.total_expense().to_string(),
            self.total_net().to_string(),
            self.rows.iter().map(|r| r.count).sum::<usize>()
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, WalletId};
    use chrono::{TimeZone, Utc};

    fn txn(
        (y, m, d): (i32, u32, u32),
        cents: i64,
        transaction_type: TransactionType,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            wallet_id: WalletId::new(),
            destination_wallet_id: None,
            amount: Money::from_cents(cents),
            transaction_type,
            category: "General".into(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
            member_id: None,
        }
    }

    #[test]
    fn test_monthly_lunch_and_pay() {
        let transactions = vec![
            txn((2024, 3, 10), 5000, TransactionType::Income),
            txn((2024, 3, 5), 2000, TransactionType::Expense),
        ];

        let report = AccountingReport::generate(&transactions, Granularity::Monthly);

        assert_eq!(
            report.rows,
            vec![AccountingRow {
                key: "2024-03".into(),
                display: "March 2024".into(),
                income: Money::from_cents(5000),
                expense: Money::from_cents(2000),
                net: Money::from_cents(3000),
                count: 2,
            }]
        );
    }

    #[test]
    fn test_rows_descending_across_year_boundary() {
        let transactions = vec![
            txn((2023, 12, 31), 100, TransactionType::Expense),
            txn((2024, 1, 1), 100, TransactionType::Income),
            txn((2023, 2, 14), 100, TransactionType::Income),
        ];

        let report = AccountingReport::generate(&transactions, Granularity::Monthly);
        let keys: Vec<_> = report.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["2024-01", "2023-12", "2023-02"]);
        assert_eq!(report.rows[0].display, "January 2024");
        assert_eq!(report.rows[1].display, "December 2023");
    }

    #[test]
    fn test_sparse_periods_only() {
        let transactions = vec![
            txn((2024, 1, 3), 100, TransactionType::Income),
            txn((2024, 6, 3), 100, TransactionType::Income),
        ];

        let report = AccountingReport::generate(&transactions, Granularity::Monthly);
        assert_eq!(report.rows.len(), 2);
    }

    #[test]
    fn test_transfer_counts_but_moves_nothing() {
        let transactions = vec![
            txn((2024, 3, 5), 700, TransactionType::Transfer),
            txn((2024, 3, 5), 300, TransactionType::Expense),
        ];

        let report = AccountingReport::generate(&transactions, Granularity::Daily);
        let row = &report.rows[0];
        assert_eq!(row.key, "2024-03-05");
        assert_eq!(row.display, "5 Mar 2024");
        assert_eq!(row.count, 2);
        assert!(row.income.is_zero());
        assert_eq!(row.expense.cents(), 300);
    }

    #[test]
    fn test_yearly_and_conservation() {
        let transactions = vec![
            txn((2022, 5, 1), 1999, TransactionType::Income),
            txn((2022, 9, 1), 501, TransactionType::Expense),
            txn((2023, 1, 1), 12345, TransactionType::Income),
            txn((2024, 7, 7), 333, TransactionType::Expense),
            txn((2024, 7, 8), 1, TransactionType::Transfer),
        ];

        for granularity in [Granularity::Daily, Granularity::Monthly, Granularity::Yearly] {
            let report = AccountingReport::generate(&transactions, granularity);
            assert_eq!(
                report.total_net(),
                report.total_income() - report.total_expense()
            );
            assert_eq!(report.total_income().cents(), 1999 + 12345);
            assert_eq!(report.total_expense().cents(), 501 + 333);
            assert_eq!(report.rows.iter().map(|r| r.count).sum::<usize>(), 5);
        }

        let yearly = AccountingReport::generate(&transactions, Granularity::Yearly);
        let keys: Vec<_> = yearly.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["2024", "2023", "2022"]);
    }

    #[test]
    fn test_empty_history() {
        let report = AccountingReport::generate(&[], Granularity::Monthly);
        assert!(report.rows.is_empty());
        assert!(report.format_terminal().contains("No transactions recorded."));
    }
}
