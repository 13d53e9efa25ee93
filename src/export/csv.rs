//! CSV Export functionality
//!
//! Amounts are written as plain decimal numbers without currency symbols.

use std::collections::HashMap;
use std::io::Write;

use crate::error::LedgerResult;
use crate::models::{Transaction, Wallet, WalletId};
use crate::reports::AccountingReport;

/// Header row of the accounting CSV
pub const ACCOUNTING_CSV_HEADER: [&str; 5] =
    ["Period", "Income", "Expense", "Net Result", "Count"];

/// Export the accounting report, one row per period in report order
///
/// `Period` is the sortable key (`2024-03`), not the display label.
pub fn export_accounting_csv<W: Write>(report: &AccountingReport, writer: W) -> LedgerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(ACCOUNTING_CSV_HEADER)?;

    for row in &report.rows {
        csv.write_record([
            row.key.clone(),
            row.income.to_string(),
            row.expense.to_string(),
            row.net.to_string(),
            row.count.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Export transactions with their wallet names
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    wallets: &[Wallet],
    writer: W,
) -> LedgerResult<()> {
    let wallet_names: HashMap<_, _> = wallets.iter().map(|w| (w.id, w.name.as_str())).collect();
    let name_of = |id: WalletId| wallet_names.get(&id).copied().unwrap_or("Unknown");

    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record([
        "ID",
        "Date",
        "Type",
        "Wallet",
        "Destination",
        "Category",
        "Description",
        "Amount",
    ])?;

    for txn in transactions {
        csv.write_record([
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.transaction_type.to_string(),
            name_of(txn.wallet_id).to_string(),
            txn.destination_wallet_id
                .map(|id| name_of(id).to_string())
                .unwrap_or_default(),
            txn.category.clone(),
            txn.description.clone(),
            txn.amount.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
