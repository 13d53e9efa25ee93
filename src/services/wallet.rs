//! Wallet service
//!
//! Creates wallets and looks them up. Balances are never edited here; they
//! move only when transactions are recorded or deleted.

use serde::Deserialize;
use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AmountInput, Money, Wallet, WalletId};
use crate::storage::{Section, Storage};

/// A wallet as submitted by a caller
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewWallet {
    pub name: String,
    #[serde(rename = "type", default)]
    pub wallet_type: String,
    #[serde(default)]
    pub institution: Option<String>,
    /// Falls back to the configured default currency
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Unparseable values are treated as zero
    #[serde(default)]
    pub initial_balance: Option<AmountInput>,
}

impl NewWallet {
    /// Start a submission with a name and type tag
    pub fn new(name: impl Into<String>, wallet_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wallet_type: wallet_type.into(),
            ..Self::default()
        }
    }

    /// Set the currency code
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the institution label
    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    /// Set the opening balance
    pub fn balance(mut self, amount: impl Into<AmountInput>) -> Self {
        self.initial_balance = Some(amount.into());
        self
    }
}

/// Service for wallet management
pub struct WalletService<'a> {
    storage: &'a Storage,
    default_currency: String,
}

impl<'a> WalletService<'a> {
    /// Create a new wallet service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            default_currency: Settings::default().default_currency,
        }
    }

    /// Take defaults from user settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.default_currency = settings.default_currency.clone();
        self
    }

    /// Create a wallet
    pub fn add(&self, input: NewWallet) -> LedgerResult<Wallet> {
        let initial_balance = match &input.initial_balance {
            Some(amount) => amount.to_money().unwrap_or_else(|e| {
                warn!(error = %e, "invalid initial balance, starting at zero");
                Money::zero()
            }),
            None => Money::zero(),
        };

        let currency = input
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.default_currency.clone());

        let mut wallet = Wallet::new(
            input.name.trim(),
            input.wallet_type.trim(),
            currency,
            initial_balance,
        );
        wallet.institution = input
            .institution
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());
        if let Some(color) = input.color {
            wallet.color = color;
        }

        wallet
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        {
            let mut book = self.storage.write()?;
            book.wallets.insert(wallet.clone());
            self.storage.persist(&book, &[Section::Wallets])?;
        }

        info!(
            wallet = %wallet.id,
            name = %wallet.name,
            currency = %wallet.currency,
            "wallet created"
        );
        self.storage.audit(AuditEntry::create(
            EntityType::Wallet,
            wallet.id.to_string(),
            Some(wallet.name.clone()),
            &wallet,
        ));

        Ok(wallet)
    }

    /// Get a wallet by ID
    pub fn get(&self, id: WalletId) -> LedgerResult<Option<Wallet>> {
        Ok(self.storage.read()?.wallets.get(id).cloned())
    }

    /// Find a wallet by ID, short ID, or name/institution
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Wallet>> {
        let identifier = identifier.trim();
        let book = self.storage.read()?;

        if let Ok(id) = identifier.parse::<WalletId>() {
            if let Some(wallet) = book.wallets.get(id) {
                return Ok(Some(wallet.clone()));
            }
        }

        if let Some(wallet) = book
            .wallets
            .all()
            .iter()
            .find(|w| w.id.to_string() == identifier)
        {
            return Ok(Some(wallet.clone()));
        }

        Ok(book.wallets.find_by_name(identifier).cloned())
    }

    /// Find a wallet, failing with `NotFound` when there is none
    pub fn require(&self, identifier: &str) -> LedgerResult<Wallet> {
        self.find(identifier)?
            .ok_or_else(|| LedgerError::wallet_not_found(identifier))
    }

    /// All wallets, in creation order
    pub fn list(&self) -> LedgerResult<Vec<Wallet>> {
        Ok(self.storage.read()?.wallets.all().to_vec())
    }
}
