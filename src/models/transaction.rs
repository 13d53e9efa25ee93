//! Transaction model
//!
//! A transaction is an immutable record of money moving into, out of, or
//! between wallets. Corrections are a delete followed by a new insert.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{MemberId, TransactionId, WalletId};
use super::money::{AmountInput, Money};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money entering the wallet
    Income,
    /// Money leaving the wallet
    Expense,
    /// Money moving from the wallet to `destination_wallet_id`
    Transfer,
}

impl TransactionType {
    /// Parse a transaction type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "INCOME"),
            Self::Expense => write!(f, "EXPENSE"),
            Self::Transfer => write!(f, "TRANSFER"),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The wallet this transaction belongs to (the source, for transfers)
    pub wallet_id: WalletId,

    /// Receiving wallet of a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_wallet_id: Option<WalletId>,

    /// Amount, never negative; direction comes from `transaction_type`
    pub amount: Money,

    /// Income, expense or transfer
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Free-form category
    pub category: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// When it happened (UTC)
    pub date: DateTime<Utc>,

    /// Household member the transaction is attributed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
}

impl Transaction {
    /// UTC calendar day of the transaction
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Check if this is an income
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Check if this is a transfer
    pub fn is_transfer(&self) -> bool {
        self.transaction_type == TransactionType::Transfer
    }

    /// Balance deltas this transaction posts, one per wallet it touches
    pub fn legs(&self) -> Vec<(WalletId, Money)> {
        match self.transaction_type {
            TransactionType::Income => vec![(self.wallet_id, self.amount)],
            TransactionType::Expense => vec![(self.wallet_id, -self.amount)],
            TransactionType::Transfer => {
                let mut legs = vec![(self.wallet_id, -self.amount)];
                if let Some(destination) = self.destination_wallet_id {
                    legs.push((destination, self.amount));
                }
                legs
            }
        }
    }

    /// Check if the transaction falls inside `[start, end]` (inclusive)
    pub fn within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.date >= start && self.date <= end
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.transaction_type,
            self.description,
            self.amount
        )
    }
}

/// A transaction as submitted by a caller, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub wallet_id: WalletId,
    #[serde(default)]
    pub destination_wallet_id: Option<WalletId>,
    pub amount: AmountInput,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to "now" when absent
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// Defaults to the first registered member when absent
    #[serde(default)]
    pub member_id: Option<MemberId>,
}

impl NewTransaction {
    /// Start a submission with the required fields
    pub fn new(
        wallet_id: WalletId,
        amount: impl Into<AmountInput>,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            wallet_id,
            destination_wallet_id: None,
            amount: amount.into(),
            transaction_type,
            category: String::new(),
            description: String::new(),
            date: None,
            member_id: None,
        }
    }

    /// Set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the date
    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the receiving wallet of a transfer
    pub fn to_wallet(mut self, destination: WalletId) -> Self {
        self.destination_wallet_id = Some(destination);
        self
    }

    /// Attribute to a household member
    pub fn member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }
}

/// Parse a transaction date from user or tool input
///
/// Accepts RFC 3339 timestamps (converted to UTC) or plain `YYYY-MM-DD`
/// dates (midnight UTC).
pub fn parse_transaction_date(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let s = s.trim();
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Ok(date.and_time(NaiveTime::MIN).and_utc()),
            Err(_) => Err(rfc_err),
        },
    }
}
