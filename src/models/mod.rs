//! Core data models for FlowLedger
//!
//! This module contains the data structures of the ledger domain: wallets,
//! transactions, household members, budget limits and reporting periods.

pub mod budget;
pub mod currency;
pub mod ids;
pub mod member;
pub mod money;
pub mod period;
pub mod transaction;
pub mod wallet;

pub use budget::{BudgetLimit, BudgetMethod, DEFAULT_CATEGORIES};
pub use member::{Member, MemberRole};
pub use currency::Currency;
pub use ids::{MemberId, TransactionId, WalletId};
pub use money::{AmountInput, Money, MoneyParseError};
pub use period::{DateRange, Granularity};
pub use transaction::{parse_transaction_date, NewTransaction, Transaction, TransactionType};
pub use wallet::{BalanceChange, Wallet};
