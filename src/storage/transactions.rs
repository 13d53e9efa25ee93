//! Transaction store
//!
//! Owns the authoritative list of transactions, most recently added first.
//! That order is insertion recency only; anything chronological sorts by
//! `date` itself.

use crate::models::{Transaction, TransactionId, WalletId};

/// In-memory transaction collection
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted order (newest insert first)
    pub fn from_vec(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Insert at the head
    pub fn insert(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
    }

    /// Remove by id, returning the removed record
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(index))
    }

    /// Get a transaction by id
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Find by full id or by its short display form (`txn-1a2b3c4d`)
    pub fn find(&self, identifier: &str) -> Option<&Transaction> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.get(id);
        }
        self.transactions
            .iter()
            .find(|t| t.id.to_string() == identifier)
    }

    /// All transactions, newest insert first
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions touching a wallet, either as source or transfer destination
    pub fn for_wallet(&self, wallet_id: WalletId) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |t| {
            t.wallet_id == wallet_id || t.destination_wallet_id == Some(wallet_id)
        })
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
