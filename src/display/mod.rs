//! Display formatting for terminal output
//!
//! Lists are rendered as tables; reports use fixed-width text.

pub mod member;
pub mod report;
pub mod transaction;
pub mod wallet;

pub use member::format_member_list;
pub use report::{format_budget_status, format_dashboard, format_drift};
pub use transaction::format_transaction_list;
pub use wallet::{format_wallet_details, format_wallet_list};
