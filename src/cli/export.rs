//! CLI commands for data export

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_full_json, export_transactions_csv};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export wallets, transactions and budget limits as JSON
    Json {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Json { output, pretty } => {
            let book = storage.read()?;
            export_full_json(&book, create_file(&output)?, pretty)?;
            println!("Full book exported to: {}", output.display());
        }
        ExportCommands::Transactions { output } => {
            let book = storage.read()?;
            export_transactions_csv(
                book.transactions.all(),
                book.wallets.all(),
                create_file(&output)?,
            )?;
            println!(
                "Exported {} transactions to: {}",
                book.transactions.len(),
                output.display()
            );
        }
    }

    Ok(())
}

pub(crate) fn create_file(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
