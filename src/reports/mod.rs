//! Reports module for FlowLedger
//!
//! Every report is a pure function of the transactions and wallets it is
//! handed; nothing here touches storage.

pub mod accounting;
pub mod budget_status;
pub mod dashboard;

pub use accounting::{AccountingReport, AccountingRow};
pub use budget_status::{BudgetStatus, CategoryStatus, ZeroBasedSummary};
pub use dashboard::{CategoryAmount, CurrencyTotals, DailyPoint, DashboardSummary};
