//! Wallet display formatting

use std::collections::BTreeMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{currency, Money, Wallet};

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    wallet_type: String,
    #[tabled(rename = "Institution")]
    institution: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl From<&Wallet> for WalletRow {
    fn from(wallet: &Wallet) -> Self {
        Self {
            id: wallet.id.to_string(),
            name: wallet.name.clone(),
            wallet_type: wallet.wallet_type.clone(),
            institution: wallet.institution.clone().unwrap_or_default(),
            balance: wallet
                .balance
                .format_with_symbol(&currency::symbol_for(&wallet.currency)),
        }
    }
}

/// Format a list of wallets as a table, with one total per currency
pub fn format_wallet_list(wallets: &[Wallet]) -> String {
    if wallets.is_empty() {
        return "No wallets found.".to_string();
    }

    let mut table = Table::new(wallets.iter().map(WalletRow::from));
    table.with(Style::rounded());

    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for wallet in wallets {
        *totals.entry(wallet.currency.as_str()).or_default() += wallet.balance;
    }

    let mut output = table.to_string();
    output.push('\n');
    for (code, total) in totals {
        output.push_str(&format!(
            "Total ({}): {}\n",
            code,
            total.format_with_symbol(&currency::symbol_for(code))
        ));
    }
    output
}

/// Format a single wallet
pub fn format_wallet_details(wallet: &Wallet) -> String {
    let symbol = currency::symbol_for(&wallet.currency);
    let mut output = String::new();

    output.push_str(&format!("Wallet: {}\n", wallet.name));
    output.push_str(&format!("  ID:          {}\n", wallet.id));
    output.push_str(&format!("  Type:        {}\n", wallet.wallet_type));
    if let Some(institution) = &wallet.institution {
        output.push_str(&format!("  Institution: {}\n", institution));
    }
    output.push_str(&format!("  Currency:    {}\n", wallet.currency));
    output.push_str(&format!(
        "  Opening:     {}\n",
        wallet.initial_balance.format_with_symbol(&symbol)
    ));
    output.push_str(&format!(
        "  Balance:     {}\n",
        wallet.balance.format_with_symbol(&symbol)
    ));
    output.push_str(&format!(
        "  Created:     {}\n",
        wallet.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_wallet_list(&[]), "No wallets found.");
    }

    #[test]
    fn test_list_totals_per_currency() {
        let wallets = vec![
            Wallet::new("Main", "Bank", "USD", Money::from_cents(1000)),
            Wallet::new("Side", "Cash", "USD", Money::from_cents(250)),
            Wallet::new("Wave", "Mobile Money", "XOF", Money::from_cents(5000)),
        ];

        let output = format_wallet_list(&wallets);
        assert!(output.contains("Main"));
        assert!(output.contains("Mobile Money"));
        assert!(output.contains("Total (USD): $12.50"));
        assert!(output.contains("Total (XOF):"));
    }

    #[test]
    fn test_details() {
        let mut wallet = Wallet::new("Main", "Bank", "EUR", Money::from_cents(1234));
        wallet.institution = Some("Orabank".into());

        let output = format_wallet_details(&wallet);
        assert!(output.contains("Institution: Orabank"));
        assert!(output.contains("Currency:    EUR"));
    }
}
