//! Wallet CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_drift, format_wallet_details, format_wallet_list};
use crate::error::LedgerResult;
use crate::services::{NewWallet, WalletService};
use crate::storage::Storage;

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Create a new wallet
    Add {
        /// Wallet name
        name: String,
        /// Type tag (Bank, Mobile Money, Cash, Crypto, ...)
        #[arg(short = 't', long = "type", default_value = "Bank")]
        wallet_type: String,
        /// Currency code, defaults to the configured currency
        #[arg(short, long)]
        currency: Option<String>,
        /// Institution (e.g., "Orabank", "Wave")
        #[arg(short, long)]
        institution: Option<String>,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Display color tag
        #[arg(long)]
        color: Option<String>,
    },
    /// List all wallets
    List,
    /// Show wallet details
    Show {
        /// Wallet name, institution or ID
        wallet: String,
    },
    /// Check balances against the transaction history
    Verify,
}

/// Handle a wallet command
pub fn handle_wallet_command(
    storage: &Storage,
    settings: &Settings,
    cmd: WalletCommands,
) -> LedgerResult<()> {
    let service = WalletService::new(storage).with_settings(settings);

    match cmd {
        WalletCommands::Add {
            name,
            wallet_type,
            currency,
            institution,
            balance,
            color,
        } => {
            let wallet = service.add(NewWallet {
                name,
                wallet_type,
                institution,
                currency,
                color,
                initial_balance: Some(balance.into()),
            })?;

            println!("Created wallet: {}", wallet.name);
            println!("  Currency: {}", wallet.currency);
            println!("  Balance: {}", wallet.balance);
            println!("  ID: {}", wallet.id);
        }

        WalletCommands::List => {
            print!("{}", format_wallet_list(&service.list()?));
        }

        WalletCommands::Show { wallet } => {
            let found = service.require(&wallet)?;
            print!("{}", format_wallet_details(&found));
        }

        WalletCommands::Verify => {
            println!("{}", format_drift(&storage.verify_balances()?));
        }
    }

    Ok(())
}
