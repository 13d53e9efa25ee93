//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_transaction_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_transaction_date, NewTransaction, TransactionType};
use crate::services::{
    EntryOrigin, MemberService, TransactionFilter, TransactionService, WalletService,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Wallet name, institution or ID
        wallet: String,
        /// Amount, always positive (e.g., "50.00")
        amount: String,
        /// income, expense or transfer
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Date (YYYY-MM-DD or RFC 3339), defaults to now
        #[arg(long)]
        date: Option<String>,
        /// Receiving wallet of a transfer
        #[arg(long)]
        to: Option<String>,
        /// Member name or ID, defaults to the first household member
        #[arg(long)]
        member: Option<String>,
        /// Submit as an automated agent (screened for duplicates)
        #[arg(long)]
        automated: bool,
        /// Record an automated transaction even if it looks like a duplicate
        #[arg(long, requires = "automated")]
        confirm: bool,
    },
    /// List transactions, newest first
    List {
        /// Filter by wallet name or ID
        #[arg(short, long)]
        wallet: Option<String>,
        /// Filter by category (partial match)
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value_t = TransactionFilter::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Delete a transaction and undo its balance effect
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn parse_day(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
        LedgerError::Validation(format!("Invalid date '{}': {}. Use YYYY-MM-DD", s, e))
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage).with_settings(settings);
    let wallets = WalletService::new(storage).with_settings(settings);

    match cmd {
        TransactionCommands::Add {
            wallet,
            amount,
            kind,
            category,
            description,
            date,
            to,
            member,
            automated,
            confirm,
        } => {
            let source = wallets.require(&wallet)?;
            let transaction_type = TransactionType::parse(&kind).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Invalid transaction type: '{}'. Valid types: income, expense, transfer",
                    kind
                ))
            })?;

            let mut input = NewTransaction::new(source.id, amount, transaction_type);
            if let Some(category) = category {
                input = input.category(category);
            }
            if let Some(description) = description {
                input = input.description(description);
            }
            if let Some(date) = date {
                let date = parse_transaction_date(&date).map_err(|e| {
                    LedgerError::Validation(format!("Invalid date '{}': {}", date, e))
                })?;
                input = input.on(date);
            }
            if let Some(to) = to {
                input = input.to_wallet(wallets.require(&to)?.id);
            }
            if let Some(member) = member {
                input = input.member(MemberService::new(storage).require(&member)?.id);
            }

            let origin = match (automated, confirm) {
                (false, _) => EntryOrigin::Interactive,
                (true, false) => EntryOrigin::automated(),
                (true, true) => EntryOrigin::confirmed(),
            };

            let txn = service.add(input, origin)?;
            println!(
                "Recorded {} {} in {}",
                txn.transaction_type, txn.amount, source.name
            );
            println!("  Category: {}", txn.category);
            println!("  Date: {}", txn.date.format("%Y-%m-%d"));
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            wallet,
            category,
            from,
            to,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(wallet) = wallet {
                filter = filter.wallet(wallets.require(&wallet)?.id);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(from) = from {
                filter.start_date = Some(parse_day(&from)?);
            }
            if let Some(to) = to {
                filter.end_date = Some(parse_day(&to)?);
            }

            let transactions = service.list(filter)?;
            println!("{}", format_transaction_list(&transactions, &wallets.list()?));
        }

        TransactionCommands::Delete { id } => {
            let found = service
                .find(&id)?
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;
            let deleted = service.delete(found.id)?;
            println!("Deleted transaction: {}", deleted);
        }
    }

    Ok(())
}
