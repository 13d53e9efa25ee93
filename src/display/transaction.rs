//! Transaction display formatting

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{currency, Transaction, TransactionType, Wallet, WalletId};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions as a table, amounts signed by direction
pub fn format_transaction_list(transactions: &[Transaction], wallets: &[Wallet]) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let by_id: HashMap<WalletId, &Wallet> = wallets.iter().map(|w| (w.id, w)).collect();
    let name_of = |id: WalletId| {
        by_id
            .get(&id)
            .map(|w| w.name.clone())
            .unwrap_or_else(|| "(deleted)".to_string())
    };

    let rows = transactions.iter().map(|txn| {
        let symbol = by_id
            .get(&txn.wallet_id)
            .map(|w| currency::symbol_for(&w.currency))
            .unwrap_or_default();
        let signed = match txn.transaction_type {
            TransactionType::Expense => -txn.amount,
            TransactionType::Income | TransactionType::Transfer => txn.amount,
        };
        let wallet = match txn.destination_wallet_id {
            Some(destination) => {
                format!("{} -> {}", name_of(txn.wallet_id), name_of(destination))
            }
            None => name_of(txn.wallet_id),
        };

        TransactionRow {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.transaction_type.to_string(),
            wallet,
            category: txn.category.clone(),
            description: truncate(&txn.description, 30),
            amount: signed.format_with_symbol(&symbol),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Truncate a string to a maximum length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
