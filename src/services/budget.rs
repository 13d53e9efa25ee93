//! Budget service
//!
//! Category limits and the budgeting method preference.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AmountInput, BudgetLimit, BudgetMethod};
use crate::reports::BudgetStatus;
use crate::storage::{Section, Storage};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the limit of a category, replacing any previous one
    pub fn set_limit(
        &self,
        category: &str,
        value: impl Into<AmountInput>,
    ) -> LedgerResult<BudgetLimit> {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("Category cannot be empty".into()));
        }

        let limit = value
            .into()
            .to_money()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        if limit.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Budget limit cannot be negative: {}",
                limit
            )));
        }

        let limit = BudgetLimit::new(category, limit);
        let previous = {
            let mut book = self.storage.write()?;
            let previous = book.limits.upsert(limit.clone());
            self.storage.persist(&book, &[Section::Limits])?;
            previous
        };

        info!(category = %limit.category, limit = %limit.limit, "budget limit set");
        self.storage.audit(AuditEntry::upsert(
            EntityType::BudgetLimit,
            limit.category.clone(),
            previous.as_ref(),
            &limit,
        ));

        Ok(limit)
    }

    /// All configured limits
    pub fn limits(&self) -> LedgerResult<Vec<BudgetLimit>> {
        Ok(self.storage.read()?.limits.all().to_vec())
    }

    /// Change the budgeting method
    pub fn set_method(&self, method: BudgetMethod) -> LedgerResult<()> {
        let previous = {
            let mut book = self.storage.write()?;
            let previous = std::mem::replace(&mut book.method, method);
            self.storage.persist(&book, &[Section::Method])?;
            previous
        };

        info!(%method, "budget method set");
        self.storage.audit(AuditEntry::upsert(
            EntityType::BudgetMethod,
            "budget_method",
            Some(&previous),
            &method,
        ));
        Ok(())
    }

    /// Current budgeting method
    pub fn method(&self) -> LedgerResult<BudgetMethod> {
        Ok(self.storage.read()?.method)
    }

    /// Budget status for the current UTC month under `method`
    pub fn status(&self, method: BudgetMethod) -> LedgerResult<BudgetStatus> {
        self.status_on(method, Utc::now().date_naive())
    }

    /// Budget status for the month containing `today`
    pub fn status_on(&self, method: BudgetMethod, today: NaiveDate) -> LedgerResult<BudgetStatus> {
        let book = self.storage.read()?;
        Ok(BudgetStatus::generate(
            book.transactions.all(),
            &book.limits,
            method,
            today,
        ))
    }
}
