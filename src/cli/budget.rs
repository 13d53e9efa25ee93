//! Budget CLI commands

use clap::Subcommand;

use crate::display::format_budget_status;
use crate::error::{LedgerError, LedgerResult};
use crate::models::BudgetMethod;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly limit of a category
    Set {
        /// Category name
        category: String,
        /// Limit (e.g., "300" or "300.00")
        amount: String,
    },
    /// List configured limits
    List,
    /// Show or change the budgeting method
    Method {
        /// envelope, zero-based, free or remaining
        method: Option<String>,
    },
    /// Spending against limits for the current month
    Status {
        /// Method to report under, defaults to the saved one
        #[arg(short, long)]
        method: Option<String>,
    },
}

fn parse_method(s: &str) -> LedgerResult<BudgetMethod> {
    BudgetMethod::parse(s).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid budget method: '{}'. Valid methods: envelope, zero-based, free, remaining",
            s
        ))
    })
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> LedgerResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let limit = service.set_limit(&category, amount)?;
            println!("Budget for {} set to {}", limit.category, limit.limit);
        }

        BudgetCommands::List => {
            let limits = service.limits()?;
            if limits.is_empty() {
                println!("No budget limits set.");
            }
            for limit in limits {
                println!("{:<20} {:>12}", limit.category, limit.limit.to_string());
            }
        }

        BudgetCommands::Method { method: None } => {
            println!("Budget method: {}", service.method()?);
        }

        BudgetCommands::Method {
            method: Some(method),
        } => {
            let method = parse_method(&method)?;
            service.set_method(method)?;
            println!("Budget method set to {}", method);
        }

        BudgetCommands::Status { method } => {
            let method = match method {
                Some(method) => parse_method(&method)?,
                None => service.method()?,
            };
            print!("{}", format_budget_status(&service.status(method)?));
        }
    }

    Ok(())
}
