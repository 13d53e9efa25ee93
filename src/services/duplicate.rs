//! Duplicate screening for automated inserts
//!
//! An automated caller (an assistant parsing a receipt, say) may submit the
//! same movement twice. A candidate is a duplicate of an existing
//! transaction when both fall on the same UTC day, have the same type and
//! the same amount to the cent.

use chrono::NaiveDate;

use crate::error::LedgerError;
use crate::models::{Money, Transaction, TransactionType};
use crate::storage::TransactionStore;

/// Finds existing transactions an automated insert would repeat
pub struct DuplicateGuard<'a> {
    store: &'a TransactionStore,
}

impl<'a> DuplicateGuard<'a> {
    /// Screen against `store`
    pub fn new(store: &'a TransactionStore) -> Self {
        Self { store }
    }

    /// First stored transaction matching the candidate, if any
    pub fn find_match(
        &self,
        date: NaiveDate,
        amount: Money,
        transaction_type: TransactionType,
    ) -> Option<&'a Transaction> {
        self.store.all().iter().find(|t| {
            t.transaction_type == transaction_type && t.amount == amount && t.day() == date
        })
    }

    /// Fail with [`LedgerError::DuplicateDetected`] if the candidate matches
    pub fn check(
        &self,
        date: NaiveDate,
        amount: Money,
        transaction_type: TransactionType,
    ) -> Result<(), LedgerError> {
        match self.find_match(date, amount, transaction_type) {
            Some(existing) => Err(LedgerError::DuplicateDetected {
                date,
                amount,
                transaction_type,
                existing: Box::new(existing.clone()),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, WalletId};
    use chrono::{TimeZone, Utc};

    fn stored(cents: i64, hour: u32) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            wallet_id: WalletId::new(),
            destination_wallet_id: None,
            amount: Money::from_cents(cents),
            transaction_type: TransactionType::Expense,
            category: "Food".into(),
            description: "Lunch".into(),
            date: Utc.with_ymd_and_hms(2024, 3, 5, hour, 0, 0).unwrap(),
            member_id: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_same_day_type_and_amount_matches() {
        let mut store = TransactionStore::new();
        store.insert(stored(2000, 8));
        let guard = DuplicateGuard::new(&store);

        let result = guard.check(day(5), Money::from_cents(2000), TransactionType::Expense);
        assert!(matches!(result, Err(LedgerError::DuplicateDetected { .. })));
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let mut store = TransactionStore::new();
        store.insert(stored(2000, 23));
        let guard = DuplicateGuard::new(&store);

        assert!(guard
            .find_match(day(5), Money::from_cents(2000), TransactionType::Expense)
            .is_some());
    }

    #[test]
    fn test_any_difference_is_not_a_duplicate() {
        let mut store = TransactionStore::new();
        store.insert(stored(2000, 8));
        let guard = DuplicateGuard::new(&store);

        assert!(guard
            .check(day(6), Money::from_cents(2000), TransactionType::Expense)
            .is_ok());
        assert!(guard
            .check(day(5), Money::from_cents(2001), TransactionType::Expense)
            .is_ok());
        assert!(guard
            .check(day(5), Money::from_cents(2000), TransactionType::Income)
            .is_ok());
    }
}
