//! Transaction service
//!
//! Records and deletes transactions. Each mutation updates the transaction
//! store and the wallet balances under one write lock, then persists both
//! before the lock is released.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, Transaction, TransactionId, TransactionType, WalletId};
use crate::storage::{Section, Storage};

use super::duplicate::DuplicateGuard;

/// Description given to automated inserts that arrive without one
pub const AUTOMATED_DESCRIPTION: &str = "AI Transaction";

/// Who is submitting a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrigin {
    /// A person entering it by hand; never screened for duplicates
    #[default]
    Interactive,
    /// An automated agent; screened unless `confirmed`
    Automated { confirmed: bool },
}

impl EntryOrigin {
    /// Automated insert subject to duplicate screening
    pub fn automated() -> Self {
        Self::Automated { confirmed: false }
    }

    /// Automated insert the caller confirmed after a duplicate warning
    pub fn confirmed() -> Self {
        Self::Automated { confirmed: true }
    }

    /// Whether this insert goes through the duplicate guard
    pub fn screens_duplicates(&self) -> bool {
        matches!(self, Self::Automated { confirmed: false })
    }

    /// Whether this insert comes from an automated agent
    pub fn is_automated(&self) -> bool {
        matches!(self, Self::Automated { .. })
    }
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// First UTC day included
    pub start_date: Option<NaiveDate>,
    /// Last UTC day included
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the category
    pub category: Option<String>,
    /// Source or transfer destination wallet
    pub wallet_id: Option<WalletId>,
    /// Maximum number returned, [`TransactionFilter::DEFAULT_LIMIT`] when unset
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Results returned when no limit is given
    pub const DEFAULT_LIMIT: usize = 20;

    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Filter by category substring
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by wallet
    pub fn wallet(mut self, wallet_id: WalletId) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        let day = txn.day();
        if self.start_date.is_some_and(|start| day < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| day > end) {
            return false;
        }
        if let Some(wallet_id) = self.wallet_id {
            if txn.wallet_id != wallet_id && txn.destination_wallet_id != Some(wallet_id) {
                return false;
            }
        }
        match &self.category {
            Some(category) => txn
                .category
                .to_lowercase()
                .contains(&category.to_lowercase()),
            None => true,
        }
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    default_category: String,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            default_category: Settings::default().default_category,
        }
    }

    /// Take defaults from user settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.default_category = settings.default_category.clone();
        self
    }

    /// Record a transaction and post it to the wallet balances
    ///
    /// # Errors
    ///
    /// - `Validation` for a non-numeric, non-finite or negative amount, or a
    ///   transfer without a distinct destination wallet
    /// - `NotFound` when a referenced wallet or member does not exist
    /// - `DuplicateDetected` for an unconfirmed automated insert matching an
    ///   existing transaction; nothing is stored
    pub fn add(&self, input: NewTransaction, origin: EntryOrigin) -> LedgerResult<Transaction> {
        let amount = input
            .amount
            .to_money()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        if amount.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Amount cannot be negative: {}",
                amount
            )));
        }

        match (input.transaction_type, input.destination_wallet_id) {
            (TransactionType::Transfer, None) => {
                return Err(LedgerError::Validation(
                    "A transfer needs a destination wallet".into(),
                ))
            }
            (TransactionType::Transfer, Some(dest)) if dest == input.wallet_id => {
                return Err(LedgerError::Validation(
                    "A transfer cannot go to its own source wallet".into(),
                ))
            }
            (TransactionType::Income | TransactionType::Expense, Some(_)) => {
                return Err(LedgerError::Validation(
                    "Only transfers have a destination wallet".into(),
                ))
            }
            _ => {}
        }

        let category = match input.category.trim() {
            "" => self.default_category.clone(),
            category => category.to_string(),
        };
        let description = match input.description.trim() {
            "" if origin.is_automated() => AUTOMATED_DESCRIPTION.to_string(),
            description => description.to_string(),
        };
        let date: DateTime<Utc> = input.date.unwrap_or_else(Utc::now);

        let mut txn = Transaction {
            id: TransactionId::new(),
            wallet_id: input.wallet_id,
            destination_wallet_id: input.destination_wallet_id,
            amount,
            transaction_type: input.transaction_type,
            category,
            description,
            date,
            member_id: input.member_id,
        };

        let changes = {
            let mut book = self.storage.write()?;

            for wallet_id in std::iter::once(txn.wallet_id).chain(txn.destination_wallet_id) {
                if !book.wallets.contains(wallet_id) {
                    return Err(LedgerError::wallet_not_found(wallet_id.to_string()));
                }
            }
            txn.member_id = match txn.member_id {
                Some(member_id) if book.members.get(member_id).is_none() => {
                    return Err(LedgerError::member_not_found(member_id.to_string()));
                }
                Some(member_id) => Some(member_id),
                None => book.members.primary().map(|m| m.id),
            };

            if origin.screens_duplicates() {
                if let Err(e) = DuplicateGuard::new(&book.transactions).check(
                    txn.day(),
                    txn.amount,
                    txn.transaction_type,
                ) {
                    warn!(
                        date = %txn.day(),
                        amount = %txn.amount,
                        kind = %txn.transaction_type,
                        "possible duplicate automated transaction held back"
                    );
                    return Err(e);
                }
            }

            let changes = book.record(txn.clone())?;
            self.storage
                .persist(&book, &[Section::Transactions, Section::Wallets])?;
            changes
        };

        info!(
            transaction = %txn.id,
            wallet = %txn.wallet_id,
            kind = %txn.transaction_type,
            amount = %txn.amount,
            "transaction recorded"
        );
        self.storage.audit(
            AuditEntry::create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.to_string()),
                &txn,
            )
            .with_balance_changes(changes),
        );

        Ok(txn)
    }

    /// Delete a transaction and undo its effect on the wallet balances
    pub fn delete(&self, id: TransactionId) -> LedgerResult<Transaction> {
        let (txn, changes) = {
            let mut book = self.storage.write()?;
            let removed = book
                .remove(id)?
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            self.storage
                .persist(&book, &[Section::Transactions, Section::Wallets])?;
            removed
        };

        info!(transaction = %txn.id, "transaction deleted");
        self.storage.audit(
            AuditEntry::delete(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.to_string()),
                &txn,
            )
            .with_balance_changes(changes),
        );

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        Ok(self.storage.read()?.transactions.get(id).cloned())
    }

    /// Find a transaction by full or short ID string
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Transaction>> {
        Ok(self.storage.read()?.transactions.find(identifier).cloned())
    }

    /// Matching transactions, newest date first
    pub fn list(&self, filter: TransactionFilter) -> LedgerResult<Vec<Transaction>> {
        let book = self.storage.read()?;
        let mut transactions: Vec<Transaction> = book
            .transactions
            .all()
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();

        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions.truncate(filter.limit.unwrap_or(TransactionFilter::DEFAULT_LIMIT));
        Ok(transactions)
    }

    /// Every transaction, most recently added first
    pub fn all(&self) -> LedgerResult<Vec<Transaction>> {
        Ok(self.storage.read()?.transactions.all().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, AuditQuery};
    use crate::models::{AmountInput, Member, MemberId, Money, Wallet};
    use crate::services::{NewWallet, WalletService};
    use chrono::TimeZone;

    fn setup(balance: &str) -> (Storage, Wallet) {
        let storage = Storage::in_memory();
        let wallet = WalletService::new(&storage)
            .add(NewWallet::new("W1", "Bank").currency("USD").balance(balance))
            .unwrap();
        (storage, wallet)
    }

    fn on(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn balance(storage: &Storage, id: WalletId) -> i64 {
        storage.read().unwrap().wallets.get(id).unwrap().balance.cents()
    }

    #[test]
    fn test_add_and_delete_move_the_balance() {
        let (storage, wallet) = setup("100");
        let service = TransactionService::new(&storage);

        let lunch = service
            .add(
                NewTransaction::new(wallet.id, 20.0, TransactionType::Expense)
                    .category("Food")
                    .description("Lunch")
                    .on(on(2024, 3, 5)),
                EntryOrigin::Interactive,
            )
            .unwrap();
        assert_eq!(balance(&storage, wallet.id), 8000);

        service
            .add(
                NewTransaction::new(wallet.id, "50", TransactionType::Income)
                    .category("Salary")
                    .description("Pay")
                    .on(on(2024, 3, 10)),
                EntryOrigin::Interactive,
            )
            .unwrap();
        assert_eq!(balance(&storage, wallet.id), 13000);

        service.delete(lunch.id).unwrap();
        assert_eq!(balance(&storage, wallet.id), 15000);
        assert_eq!(service.all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let (storage, wallet) = setup("10");
        let service = TransactionService::new(&storage);

        let err = service.delete(TransactionId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(balance(&storage, wallet.id), 1000);
    }

    #[test]
    fn test_unknown_wallet_is_not_found_and_stores_nothing() {
        let (storage, _wallet) = setup("0");
        let service = TransactionService::new(&storage);

        let err = service
            .add(
                NewTransaction::new(WalletId::new(), 5.0, TransactionType::Expense),
                EntryOrigin::Interactive,
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(service.all().unwrap().is_empty());
    }

    #[test]
    fn test_bad_amounts_are_validation_errors() {
        let (storage, wallet) = setup("0");
        let service = TransactionService::new(&storage);

        let amounts: [AmountInput; 7] = [
            "abc".into(),
            "".into(),
            "--5".into(),
            "100000000000000000".into(),
            (-5.0).into(),
            f64::NAN.into(),
            1.0e300.into(),
        ];
        for amount in amounts {
            let err = service
                .add(
                    NewTransaction::new(wallet.id, amount, TransactionType::Expense),
                    EntryOrigin::Interactive,
                )
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(service.all().unwrap().is_empty());
        assert_eq!(balance(&storage, wallet.id), 0);
    }

    #[test]
    fn test_automated_duplicate_is_held_back_until_confirmed() {
        let (storage, wallet) = setup("100");
        let service = TransactionService::new(&storage);
        let receipt = || {
            NewTransaction::new(wallet.id, 12.5, TransactionType::Expense)
                .category("Food")
                .on(on(2024, 3, 5))
        };

        service.add(receipt(), EntryOrigin::automated()).unwrap();
        let err = service.add(receipt(), EntryOrigin::automated()).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(service.all().unwrap().len(), 1);
        assert_eq!(balance(&storage, wallet.id), 8750);

        service.add(receipt(), EntryOrigin::confirmed()).unwrap();
        assert_eq!(service.all().unwrap().len(), 2);
        assert_eq!(balance(&storage, wallet.id), 7500);
    }

    #[test]
    fn test_interactive_inserts_are_never_screened() {
        let (storage, wallet) = setup("0");
        let service = TransactionService::new(&storage);

        for _ in 0..2 {
            service
                .add(
                    NewTransaction::new(wallet.id, 3.0, TransactionType::Income).on(on(2024, 1, 1)),
                    EntryOrigin::Interactive,
                )
                .unwrap();
        }
        assert_eq!(service.all().unwrap().len(), 2);
    }

    #[test]
    fn test_automated_defaults() {
        let (storage, wallet) = setup("0");
        let service = TransactionService::new(&storage);

        let txn = service
            .add(
                NewTransaction::new(wallet.id, 1.0, TransactionType::Income),
                EntryOrigin::automated(),
            )
            .unwrap();
        assert_eq!(txn.description, AUTOMATED_DESCRIPTION);
        assert_eq!(txn.category, "General");
        assert_eq!(txn.day(), Utc::now().date_naive());
    }

    #[test]
    fn test_transfer_moves_money_between_wallets() {
        let (storage, source) = setup("100");
        let destination = WalletService::new(&storage)
            .add(NewWallet::new("Savings", "Bank"))
            .unwrap();
        let service = TransactionService::new(&storage);

        let transfer = service
            .add(
                NewTransaction::new(source.id, 40.0, TransactionType::Transfer)
                    .to_wallet(destination.id),
                EntryOrigin::Interactive,
            )
            .unwrap();
        assert_eq!(balance(&storage, source.id), 6000);
        assert_eq!(balance(&storage, destination.id), 4000);

        service.delete(transfer.id).unwrap();
        assert_eq!(balance(&storage, source.id), 10000);
        assert_eq!(balance(&storage, destination.id), 0);
    }

    #[test]
    fn test_transfer_destination_rules() {
        let (storage, wallet) = setup("100");
        let service = TransactionService::new(&storage);

        let missing = service.add(
            NewTransaction::new(wallet.id, 1.0, TransactionType::Transfer),
            EntryOrigin::Interactive,
        );
        let to_self = service.add(
            NewTransaction::new(wallet.id, 1.0, TransactionType::Transfer).to_wallet(wallet.id),
            EntryOrigin::Interactive,
        );
        let on_expense = service.add(
            NewTransaction::new(wallet.id, 1.0, TransactionType::Expense)
                .to_wallet(WalletId::new()),
            EntryOrigin::Interactive,
        );

        for result in [missing, to_self, on_expense] {
            assert!(result.unwrap_err().is_validation());
        }
    }

    #[test]
    fn test_list_filters_and_orders_by_date() {
        let (storage, wallet) = setup("0");
        let service = TransactionService::new(&storage);
        for (day, category) in [(3, "Food"), (1, "Fast food"), (7, "Rent"), (5, "Food")] {
            service
                .add(
                    NewTransaction::new(
                        wallet.id,
                        Money::from_cents(100),
                        TransactionType::Expense,
                    )
                    .category(category)
                    .on(on(2024, 3, day)),
                    EntryOrigin::Interactive,
                )
                .unwrap();
        }

        let food = service
            .list(TransactionFilter::new().category("FOOD"))
            .unwrap();
        let days: Vec<_> = food.iter().map(|t| t.day().to_string()).collect();
        assert_eq!(days, ["2024-03-05", "2024-03-03", "2024-03-01"]);

        let early = service
            .list(
                TransactionFilter::new()
                    .date_range(
                        NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
                    )
                    .limit(1),
            )
            .unwrap();
        assert_eq!(early.len(), 1);
        assert_eq!(early[0].day().to_string(), "2024-03-05");

        let other_wallet = service
            .list(TransactionFilter::new().wallet(WalletId::new()))
            .unwrap();
        assert!(other_wallet.is_empty());
    }

    #[test]
    fn test_find_by_short_id() {
        let (storage, wallet) = setup("0");
        let service = TransactionService::new(&storage);
        let txn = service
            .add(
                NewTransaction::new(wallet.id, 1.0, TransactionType::Income),
                EntryOrigin::Interactive,
            )
            .unwrap();

        let found = service.find(&txn.id.to_string()).unwrap();
        assert_eq!(found.map(|t| t.id), Some(txn.id));
        assert_eq!(service.get(txn.id).unwrap().map(|t| t.id), Some(txn.id));
    }

    #[test]
    fn test_balance_overflow_is_rejected_without_poisoning() {
        let (storage, wallet) = setup("0");
        let service = TransactionService::new(&storage);
        let big = || NewTransaction::new(wallet.id, 5.0e16, TransactionType::Income);

        service.add(big(), EntryOrigin::Interactive).unwrap();
        let err = service.add(big(), EntryOrigin::Interactive).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.all().unwrap().len(), 1);
        assert_eq!(balance(&storage, wallet.id), 5_000_000_000_000_000_000);

        service
            .add(
                NewTransaction::new(wallet.id, 1.0, TransactionType::Expense),
                EntryOrigin::Interactive,
            )
            .unwrap();
        assert_eq!(balance(&storage, wallet.id), 4_999_999_999_999_999_900);
        assert!(storage.verify_balances().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_adds_and_deletes_keep_balances_consistent() {
        let (storage, wallet) = setup("0");
        let savings = WalletService::new(&storage)
            .add(NewWallet::new("Savings", "Bank"))
            .unwrap();
        let (main_id, savings_id) = (wallet.id, savings.id);

        std::thread::scope(|scope| {
            for worker in 0..4i64 {
                let storage = &storage;
                scope.spawn(move || {
                    let service = TransactionService::new(storage);
                    for round in 0..25i64 {
                        let kind = match round % 3 {
                            0 => TransactionType::Income,
                            1 => TransactionType::Expense,
                            _ => TransactionType::Transfer,
                        };
                        let mut input = NewTransaction::new(
                            main_id,
                            Money::from_cents(100 + worker * 10 + round),
                            kind,
                        );
                        if kind == TransactionType::Transfer {
                            input = input.to_wallet(savings_id);
                        }
                        let txn = service.add(input, EntryOrigin::Interactive).unwrap();
                        if round % 2 == 0 {
                            service.delete(txn.id).unwrap();
                        }
                    }
                });
            }
        });

        let service = TransactionService::new(&storage);
        let survivors = service.all().unwrap();
        assert_eq!(survivors.len(), 4 * 12);
        assert!(storage.verify_balances().unwrap().is_empty());

        let mut expected_main = 0;
        let mut expected_savings = 0;
        for txn in &survivors {
            match txn.transaction_type {
                TransactionType::Income => expected_main += txn.amount.cents(),
                TransactionType::Expense => expected_main -= txn.amount.cents(),
                TransactionType::Transfer => {
                    expected_main -= txn.amount.cents();
                    expected_savings += txn.amount.cents();
                }
            }
        }
        assert_eq!(balance(&storage, wallet.id), expected_main);
        assert_eq!(balance(&storage, savings.id), expected_savings);
    }

    #[test]
    fn test_member_defaults_to_owner_and_unknown_member_is_rejected() {
        let (storage, wallet) = setup("10");
        let service = TransactionService::new(&storage);

        let txn = service
            .add(
                NewTransaction::new(wallet.id, 1.0, TransactionType::Expense),
                EntryOrigin::Interactive,
            )
            .unwrap();
        assert_eq!(txn.member_id, Some(Member::owner().id));

        let err = service
            .add(
                NewTransaction::new(wallet.id, 1.0, TransactionType::Expense)
                    .member(MemberId::new()),
                EntryOrigin::Interactive,
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.all().unwrap().len(), 1);
        assert_eq!(balance(&storage, wallet.id), 900);
    }

    #[test]
    fn test_audit_entries_carry_balance_changes() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let storage = Storage::in_memory().with_audit(logger.clone());
        let wallet = WalletService::new(&storage)
            .add(NewWallet::new("W1", "Bank").balance(100.0))
            .unwrap();
        let service = TransactionService::new(&storage);

        let txn = service
            .add(
                NewTransaction::new(wallet.id, 30.0, TransactionType::Expense),
                EntryOrigin::Interactive,
            )
            .unwrap();
        service.delete(txn.id).unwrap();

        let entries = logger
            .query(&AuditQuery::new().entity_type(EntityType::Transaction))
            .unwrap();
        let moves: Vec<_> = entries
            .iter()
            .map(|e| (e.balance_changes[0].delta.cents(), e.balance_changes[0].balance.cents()))
            .collect();
        assert_eq!(moves, [(-3000, 7000), (3000, 10000)]);
        assert!(entries.iter().all(|e| e.touches(&wallet.id.to_string())));
    }
}
