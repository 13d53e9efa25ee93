//! CLI commands for reports

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_dashboard;
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_accounting_csv;
use crate::models::{DateRange, Granularity};
use crate::services::ReportService;
use crate::storage::Storage;

use super::export::create_file;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense and net result per period
    Accounting {
        /// daily, monthly or yearly; defaults to the configured granularity
        #[arg(short, long)]
        granularity: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Per-currency totals, expenses by category and recent activity
    Dashboard {
        /// Start date (YYYY-MM-DD), defaults to the start of this month
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), defaults to the end of this month
        #[arg(short, long)]
        end: Option<String>,
    },
}

fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let service = ReportService::new(storage);

    match cmd {
        ReportCommands::Accounting {
            granularity,
            output,
        } => {
            let granularity = match granularity {
                Some(g) => Granularity::parse(&g).ok_or_else(|| {
                    LedgerError::Validation(format!(
                        "Invalid granularity: '{}'. Use daily, monthly or yearly",
                        g
                    ))
                })?,
                None => settings.report_granularity,
            };

            let report = service.accounting(granularity)?;
            match output {
                Some(path) => {
                    export_accounting_csv(&report, create_file(&path)?)?;
                    println!(
                        "Exported {} periods to: {}",
                        report.rows.len(),
                        path.display()
                    );
                }
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Dashboard { start, end } => {
            let month = DateRange::current_month();
            let start = match start {
                Some(s) => parse_date(&s)?,
                None => month.start.date_naive(),
            };
            let end = match end {
                Some(e) => parse_date(&e)?,
                None => month.end.date_naive(),
            };
            if start > end {
                return Err(LedgerError::Validation(
                    "Start date must be before end date".into(),
                ));
            }

            let summary = service.dashboard(DateRange::from_dates(start, end))?;
            print!("{}", format_dashboard(&summary));
        }
    }

    Ok(())
}
