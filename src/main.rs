use anyhow::Result;
use clap::{Parser, Subcommand};

use flowledger::audit::{AuditQuery, EntityType};
use flowledger::cli::{
    handle_budget_command, handle_export_command, handle_member_command, handle_report_command,
    handle_transaction_command, handle_wallet_command,
};
use flowledger::config::{paths::LedgerPaths, settings::Settings};
use flowledger::services::{TransactionService, WalletService};
use flowledger::storage::Storage;
use flowledger::LedgerError;

#[derive(Parser)]
#[command(
    name = "flowledger",
    author = "Kaylee Beyene",
    version,
    about = "Household finance ledger for wallets, budgets and reports",
    long_about = "FlowLedger records money movements against named wallets (bank, \
                  mobile money, cash, ...) and keeps every balance consistent with \
                  its transaction history. It reports income and expense per period, \
                  totals per currency, and spending against monthly budgets."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Wallet management commands
    #[command(subcommand)]
    Wallet(flowledger::cli::WalletCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(flowledger::cli::TransactionCommands),

    /// Budget limits and status
    #[command(subcommand)]
    Budget(flowledger::cli::BudgetCommands),

    /// Accounting report and dashboard
    #[command(subcommand)]
    Report(flowledger::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(flowledger::cli::ExportCommands),

    /// Household members
    #[command(subcommand)]
    Member(flowledger::cli::MemberCommands),

    /// Show configuration
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
        /// Only entries about this wallet or moving its balance
        #[arg(short, long, conflicts_with = "txn")]
        wallet: Option<String>,
        /// Only entries about this transaction
        #[arg(short, long)]
        txn: Option<String>,
        /// Only one kind of entity (wallet, txn, limit, method, member)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Delete all wallets, transactions, budgets and members (settings are kept)
    Reset {
        /// Required to actually delete anything
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    flowledger::init_tracing();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(&paths, &settings)?;

    match cli.command {
        Some(Commands::Wallet(cmd)) => handle_wallet_command(&storage, &settings, cmd)?,
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Member(cmd)) => handle_member_command(&storage, cmd)?,
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("FlowLedger Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Default currency:   {}", settings.default_currency);
            println!("  Default category:   {}", settings.default_category);
            println!("  Report granularity: {}", settings.report_granularity);
            println!("  Audit enabled:      {}", settings.audit_enabled);
        }
        Some(Commands::Audit {
            count,
            wallet,
            txn,
            kind,
        }) => match storage.audit_logger() {
            Some(logger) => {
                let mut query = AuditQuery::new().limit(count);
                if let Some(kind) = kind {
                    query = query.entity_type(EntityType::parse(&kind).ok_or_else(|| {
                        LedgerError::Validation(format!(
                            "Invalid entity kind: '{}'. Valid kinds: wallet, txn, limit, \
                             method, member",
                            kind
                        ))
                    })?);
                }
                if let Some(wallet) = wallet {
                    let wallet = WalletService::new(&storage).require(&wallet)?;
                    query = query.touching(wallet.id.to_string());
                }
                if let Some(txn) = txn {
                    // Deleted transactions are only in the log, so fall back to the raw id
                    let id = match TransactionService::new(&storage).find(&txn)? {
                        Some(found) => found.id.to_string(),
                        None => txn,
                    };
                    query = query.touching(id);
                }

                let entries = logger.query(&query)?;
                if entries.is_empty() {
                    println!("No audit entries yet.");
                }
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
            None => println!("Audit logging is disabled in {}", paths.settings_file().display()),
        },
        Some(Commands::Reset { yes }) => {
            if yes {
                storage.reset()?;
                println!("All wallets, transactions, budgets and members deleted.");
            } else {
                println!("This deletes every wallet, transaction, budget limit and member.");
                println!("Run 'flowledger reset --yes' to confirm.");
            }
        }
        None => {
            println!("FlowLedger - household finance ledger");
            println!();
            println!("Run 'flowledger --help' for usage information.");
        }
    }

    Ok(())
}
