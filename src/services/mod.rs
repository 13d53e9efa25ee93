//! Service layer for FlowLedger
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, identity assignment, duplicate screening, and the
//! write-lock scope that keeps the transaction store and wallet balances in
//! step.

pub mod budget;
pub mod duplicate;
pub mod member;
pub mod report;
pub mod transaction;
pub mod wallet;

pub use budget::BudgetService;
pub use duplicate::DuplicateGuard;
pub use member::MemberService;
pub use report::ReportService;
pub use transaction::{EntryOrigin, TransactionFilter, TransactionService};
pub use wallet::{NewWallet, WalletService};
