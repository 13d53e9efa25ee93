//! Household member CLI commands

use clap::Subcommand;

use crate::display::format_member_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::MemberRole;
use crate::services::MemberService;
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a household member
    Add {
        /// Display name
        name: String,
        /// Contact email
        #[arg(short, long)]
        email: Option<String>,
        /// admin, editor or viewer
        #[arg(short, long, default_value = "editor")]
        role: String,
    },
    /// List household members
    List,
    /// Remove a member (the last one cannot be removed)
    Remove {
        /// Member name or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(storage: &Storage, cmd: MemberCommands) -> LedgerResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { name, email, role } => {
            let role = MemberRole::parse(&role).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Invalid role: '{}'. Valid roles: admin, editor, viewer",
                    role
                ))
            })?;
            let member = service.add(&name, email.as_deref(), role)?;

            println!("Added member: {}", member);
            println!("  ID: {}", member.id);
        }

        MemberCommands::List => {
            print!("{}", format_member_list(&service.list()?));
        }

        MemberCommands::Remove { member } => {
            let member = service.require(&member)?;
            let removed = service.remove(member.id)?;
            println!("Removed member: {}", removed.name);
        }
    }

    Ok(())
}
