//! FlowLedger - household finance ledger
//!
//! Users record money movements against named wallets (bank accounts,
//! mobile-money wallets, cash, ...). The engine keeps every wallet balance
//! consistent with the transactions that reference it and derives
//! time-bucketed accounting reports, per-currency dashboards and budget
//! status from the history.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (wallets, transactions, money, periods)
//! - `storage`: The in-memory book and its key-value persistence port
//! - `services`: Business logic layer
//! - `reports`: Pure report generators
//! - `audit`: Audit logging system
//! - `export`: CSV and JSON export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `flowledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use flowledger::models::{NewTransaction, TransactionType};
//! use flowledger::services::{EntryOrigin, NewWallet, TransactionService, WalletService};
//! use flowledger::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! let wallet = WalletService::new(&storage).add(NewWallet::new("Cash", "Cash").balance(100.0))?;
//! TransactionService::new(&storage).add(
//!     NewTransaction::new(wallet.id, 20.0, TransactionType::Expense).category("Food"),
//!     EntryOrigin::Interactive,
//! )?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "flowledger=warn";

/// Initializes the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` overrides the default filter. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
