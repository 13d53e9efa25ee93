//! JSON Export functionality
//!
//! Exports the complete book to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetLimit, BudgetMethod, Member, Transaction, Wallet};
use crate::storage::Book;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full book export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub wallets: Vec<Wallet>,

    /// Most recently added first
    pub transactions: Vec<Transaction>,

    pub budget_limits: Vec<BudgetLimit>,

    pub budget_method: BudgetMethod,

    /// Household members, in the order they joined
    #[serde(default)]
    pub members: Vec<Member>,
}

impl FullExport {
    /// Snapshot a book
    pub fn from_book(book: &Book) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            wallets: book.wallets.all().to_vec(),
            transactions: book.transactions.all().to_vec(),
            budget_limits: book.limits.all().to_vec(),
            budget_method: book.method,
            members: book.members.all().to_vec(),
        }
    }
}

/// Export the full book to JSON
pub fn export_full_json<W: Write>(book: &Book, writer: W, pretty: bool) -> LedgerResult<()> {
    let export = FullExport::from_book(book);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
