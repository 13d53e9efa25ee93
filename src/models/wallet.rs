//! Wallet model
//!
//! Represents a place money lives: a bank account, a mobile-money wallet,
//! cash, a crypto address, ...

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;
use super::money::Money;

/// One balance movement posted to a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    pub wallet_id: WalletId,
    pub delta: Money,
    /// Balance after the change
    pub balance: Money,
}

/// A named store of money in a single currency
///
/// `balance` starts at `initial_balance` and is then only moved by the ledger
/// applying or reversing transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier
    pub id: WalletId,

    /// Wallet name (e.g., "Main account")
    pub name: String,

    /// Free-form type tag (Bank, Mobile Money, Cash, Crypto, ...)
    #[serde(rename = "type")]
    pub wallet_type: String,

    /// Institution label (e.g., "Orabank", "Wave")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,

    /// Currency code (e.g., "USD", "XOF")
    pub currency: String,

    /// Display color tag
    #[serde(default)]
    pub color: String,

    /// Balance the wallet was created with
    #[serde(default)]
    pub initial_balance: Money,

    /// Current balance
    pub balance: Money,

    /// When the wallet was created
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new wallet holding `initial_balance`
    pub fn new(
        name: impl Into<String>,
        wallet_type: impl Into<String>,
        currency: impl Into<String>,
        initial_balance: Money,
    ) -> Self {
        Self {
            id: WalletId::new(),
            name: name.into(),
            wallet_type: wallet_type.into(),
            institution: None,
            currency: normalize_currency(&currency.into()),
            color: String::new(),
            initial_balance,
            balance: initial_balance,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match on name or institution
    pub fn matches_name(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .institution
                .as_ref()
                .is_some_and(|i| i.to_lowercase().contains(&query))
    }

    /// Validate the wallet
    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.name.trim().is_empty() {
            return Err(WalletValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(WalletValidationError::NameTooLong(self.name.len()));
        }

        if self.currency.is_empty() || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(WalletValidationError::InvalidCurrency(self.currency.clone()));
        }

        Ok(())
    }
}

/// Canonical form of a currency code
pub fn normalize_currency(code: &str) -> String {
    code.trim().to_uppercase()
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.institution {
            Some(institution) => write!(f, "{} ({}, {})", self.name, self.wallet_type, institution),
            None => write!(f, "{} ({})", self.name, self.wallet_type),
        }
    }
}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidCurrency(String),
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Wallet name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Wallet name too long ({} chars, max 100)", len)
            }
            Self::InvalidCurrency(code) => write!(f, "Invalid currency code: '{}'", code),
        }
    }
}

impl std::error::Error for WalletValidationError {}
