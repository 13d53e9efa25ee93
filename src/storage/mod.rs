//! Storage layer for FlowLedger
//!
//! The whole book (wallets, transactions, budget limits and method, household
//! members) lives in memory behind one `RwLock`. Mutations take the write
//! lock, update the transaction store and the wallet ledger together, then
//! write the touched sections back through the [`KeyValueStore`] port before
//! releasing it.

pub mod budget;
pub mod file_io;
pub mod kv;
pub mod members;
pub mod transactions;
pub mod wallets;

pub use budget::BudgetLimits;
pub use file_io::{read_json, write_json_atomic};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use members::MemberRegistry;
pub use transactions::TransactionStore;
pub use wallets::{BalanceDrift, WalletLedger};

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::LedgerError;
use crate::models::{
    BalanceChange, BudgetLimit, BudgetMethod, Member, Transaction, TransactionId, Wallet,
};

/// Storage key of the wallet list
pub const WALLETS_KEY: &str = "wallets";
/// Storage key of the transaction list
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Storage key of the budget limits
pub const BUDGET_LIMITS_KEY: &str = "budget_limits";
/// Storage key of the budget method preference
pub const BUDGET_METHOD_KEY: &str = "budget_method";
/// Storage key of the household members
pub const MEMBERS_KEY: &str = "members";

const ALL_KEYS: [&str; 5] = [
    WALLETS_KEY,
    TRANSACTIONS_KEY,
    BUDGET_LIMITS_KEY,
    BUDGET_METHOD_KEY,
    MEMBERS_KEY,
];

/// Part of the book to write back after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Wallets,
    Transactions,
    Limits,
    Method,
    Members,
}

/// Everything the engine knows, as one unit of state
#[derive(Debug, Clone, Default)]
pub struct Book {
    pub wallets: WalletLedger,
    pub transactions: TransactionStore,
    pub limits: BudgetLimits,
    pub method: BudgetMethod,
    pub members: MemberRegistry,
}

impl Book {
    /// Post a transaction's balance effect, then insert it
    ///
    /// Nothing changes when the posting is rejected.
    pub fn record(&mut self, transaction: Transaction) -> Result<Vec<BalanceChange>, LedgerError> {
        let changes = self.wallets.apply(&transaction)?;
        self.transactions.insert(transaction);
        Ok(changes)
    }

    /// Undo a transaction's balance effect, then remove it
    ///
    /// `Ok(None)` when no transaction has that id.
    pub fn remove(
        &mut self,
        id: TransactionId,
    ) -> Result<Option<(Transaction, Vec<BalanceChange>)>, LedgerError> {
        let Some(transaction) = self.transactions.get(id).cloned() else {
            return Ok(None);
        };
        let changes = self.wallets.reverse(&transaction)?;
        self.transactions.remove(id);
        Ok(Some((transaction, changes)))
    }
}

/// Main storage coordinator
pub struct Storage {
    store: Box<dyn KeyValueStore>,
    book: RwLock<Book>,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Wrap a persistence port; the book starts empty until [`Storage::load_all`]
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            book: RwLock::new(Book::default()),
            audit: None,
        }
    }

    /// Non-persistent storage, for tests and embedding
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Open the on-disk book under `paths` and hydrate it
    pub fn open(paths: &LedgerPaths, settings: &Settings) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        let mut storage = Self::new(Box::new(JsonFileStore::new(paths.data_dir())));
        if settings.audit_enabled {
            storage = storage.with_audit(AuditLogger::new(paths.audit_log()));
        }
        storage.load_all()?;
        Ok(storage)
    }

    /// Record every mutation to `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Replace the in-memory book with what the store holds
    ///
    /// Absent keys hydrate as empty collections; absent members as the
    /// owner alone.
    pub fn load_all(&self) -> Result<(), LedgerError> {
        let wallets: Vec<Wallet> = self.load_key(WALLETS_KEY)?.unwrap_or_default();
        let transactions: Vec<Transaction> =
            self.load_key(TRANSACTIONS_KEY)?.unwrap_or_default();
        let limits: Vec<BudgetLimit> = self.load_key(BUDGET_LIMITS_KEY)?.unwrap_or_default();
        let method: BudgetMethod = self.load_key(BUDGET_METHOD_KEY)?.unwrap_or_default();
        let members: Vec<Member> = self.load_key(MEMBERS_KEY)?.unwrap_or_default();

        info!(
            wallets = wallets.len(),
            transactions = transactions.len(),
            limits = limits.len(),
            members = members.len(),
            "loaded book"
        );

        let mut book = self.write()?;
        *book = Book {
            wallets: WalletLedger::from_vec(wallets),
            transactions: TransactionStore::from_vec(transactions),
            limits: BudgetLimits::from_vec(limits),
            method,
            members: MemberRegistry::from_vec(members),
        };
        Ok(())
    }

    fn load_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LedgerError> {
        match self.store.load(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| LedgerError::Storage(format!("Failed to parse '{}': {}", key, e))),
            None => Ok(None),
        }
    }

    fn save_key<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<(), LedgerError> {
        let value = serde_json::to_value(data)?;
        self.store.save(key, &value)?;
        debug!(key, "saved section");
        Ok(())
    }

    /// Shared access to the book
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Book>, LedgerError> {
        self.book
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Exclusive access to the book
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Book>, LedgerError> {
        self.book
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Write the given sections of `book` back to the store
    ///
    /// Callers pass the book they hold the write guard for, so saved state
    /// follows mutation order.
    pub fn persist(&self, book: &Book, sections: &[Section]) -> Result<(), LedgerError> {
        for section in sections {
            match section {
                Section::Wallets => self.save_key(WALLETS_KEY, book.wallets.all())?,
                Section::Transactions => {
                    self.save_key(TRANSACTIONS_KEY, book.transactions.all())?
                }
                Section::Limits => self.save_key(BUDGET_LIMITS_KEY, book.limits.all())?,
                Section::Method => self.save_key(BUDGET_METHOD_KEY, &book.method)?,
                Section::Members => self.save_key(MEMBERS_KEY, book.members.all())?,
            }
        }
        Ok(())
    }

    /// Append an audit entry, if auditing is enabled
    ///
    /// The mutation has already happened, so a failed write is logged and
    /// not returned.
    pub fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }

    /// The audit logger, if auditing is enabled
    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Wallets whose balance disagrees with their transaction history
    pub fn verify_balances(&self) -> Result<Vec<BalanceDrift>, LedgerError> {
        let book = self.read()?;
        Ok(book.wallets.verify(&book.transactions))
    }

    /// Forget all wallets, transactions, limits, members and the budget method
    ///
    /// The household goes back to the owner alone.
    pub fn reset(&self) -> Result<(), LedgerError> {
        let mut book = self.write()?;
        for key in ALL_KEYS {
            self.store.remove(key)?;
        }
        *book = Book::default();
        info!("book reset");
        Ok(())
    }
}
