//! Wallet ledger
//!
//! Owns wallet balances. The only way a balance moves after creation is
//! [`WalletLedger::apply`] or [`WalletLedger::reverse`] of a transaction.
//!
//! Transactions whose wallet no longer exists are tolerated: the missing leg
//! is skipped so history is never lost when a wallet disappears.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::models::{BalanceChange, Money, Transaction, Wallet, WalletId};

use super::transactions::TransactionStore;

/// A wallet whose recorded balance disagrees with its history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceDrift {
    pub wallet_id: WalletId,
    pub wallet_name: String,
    pub recorded: Money,
    pub expected: Money,
}

/// Wallets and their balances, in creation order
#[derive(Debug, Clone, Default)]
pub struct WalletLedger {
    wallets: Vec<Wallet>,
}

impl WalletLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted wallets, balances as stored
    pub fn from_vec(wallets: Vec<Wallet>) -> Self {
        Self { wallets }
    }

    /// Register a new wallet
    pub fn insert(&mut self, wallet: Wallet) {
        self.wallets.push(wallet);
    }

    /// Get a wallet by id
    pub fn get(&self, id: WalletId) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    /// Check if a wallet exists
    pub fn contains(&self, id: WalletId) -> bool {
        self.get(id).is_some()
    }

    /// First wallet whose name or institution contains `query`
    pub fn find_by_name(&self, query: &str) -> Option<&Wallet> {
        let lower = query.to_lowercase();
        self.wallets
            .iter()
            .find(|w| w.name.to_lowercase() == lower)
            .or_else(|| self.wallets.iter().find(|w| w.matches_name(query)))
    }

    /// All wallets, in creation order
    pub fn all(&self) -> &[Wallet] {
        &self.wallets
    }

    /// Number of wallets
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    /// Check if there are no wallets
    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Post a transaction's effect onto the wallet balances
    ///
    /// Either every leg posts or none does: a leg that would overflow a
    /// balance is a `Validation` error and leaves the ledger untouched.
    pub fn apply(&mut self, transaction: &Transaction) -> Result<Vec<BalanceChange>, LedgerError> {
        self.post(transaction, transaction.legs())
    }

    /// Undo exactly what [`WalletLedger::apply`] did
    pub fn reverse(
        &mut self,
        transaction: &Transaction,
    ) -> Result<Vec<BalanceChange>, LedgerError> {
        let inverse = transaction
            .legs()
            .into_iter()
            .map(|(wallet_id, delta)| (wallet_id, -delta))
            .collect();
        self.post(transaction, inverse)
    }

    fn post(
        &mut self,
        transaction: &Transaction,
        legs: Vec<(WalletId, Money)>,
    ) -> Result<Vec<BalanceChange>, LedgerError> {
        let mut changes: Vec<BalanceChange> = Vec::with_capacity(legs.len());
        for (wallet_id, delta) in legs {
            let Some(wallet) = self.get(wallet_id) else {
                warn!(
                    wallet = %wallet_id,
                    transaction = %transaction.id,
                    "wallet not found, balance change skipped"
                );
                continue;
            };
            let current = changes
                .iter()
                .rev()
                .find(|c| c.wallet_id == wallet_id)
                .map_or(wallet.balance, |c| c.balance);
            let balance = current.checked_add(delta).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Transaction {} would overflow the balance of wallet '{}'",
                    transaction.id, wallet.name
                ))
            })?;
            changes.push(BalanceChange {
                wallet_id,
                delta,
                balance,
            });
        }

        for change in &changes {
            if let Some(wallet) = self.wallets.iter_mut().find(|w| w.id == change.wallet_id) {
                wallet.balance = change.balance;
            }
            debug!(
                wallet = %change.wallet_id,
                transaction = %transaction.id,
                delta = change.delta.cents(),
                balance = change.balance.cents(),
                "posted balance change"
            );
        }
        Ok(changes)
    }

    /// Balances recomputed from initial balances and the full history
    ///
    /// Consistency checking only; normal operation is incremental. Sums
    /// saturate, so a history that cannot be replayed shows up as drift.
    pub fn expected_balances(&self, transactions: &TransactionStore) -> HashMap<WalletId, Money> {
        let mut balances: HashMap<WalletId, Money> = self
            .wallets
            .iter()
            .map(|w| (w.id, w.initial_balance))
            .collect();

        for transaction in transactions.all() {
            for (wallet_id, delta) in transaction.legs() {
                if let Some(balance) = balances.get_mut(&wallet_id) {
                    *balance += delta;
                }
            }
        }

        balances
    }

    /// Wallets whose recorded balance differs from the recomputed one
    pub fn verify(&self, transactions: &TransactionStore) -> Vec<BalanceDrift> {
        let expected = self.expected_balances(transactions);
        self.wallets
            .iter()
            .filter_map(|w| {
                let expected = expected.get(&w.id).copied().unwrap_or(w.initial_balance);
                (expected != w.balance).then(|| BalanceDrift {
                    wallet_id: w.id,
                    wallet_name: w.name.clone(),
                    recorded: w.balance,
                    expected,
                })
            })
            .collect()
    }
}
