//! Report service
//!
//! Takes a read snapshot of the book and hands it to the pure report
//! generators.

use chrono::Utc;

use crate::error::LedgerResult;
use crate::models::{BudgetMethod, DateRange, Granularity};
use crate::reports::{AccountingReport, BudgetStatus, DashboardSummary};
use crate::storage::Storage;

/// Service for generating reports
pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    /// Create a new report service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Income, expense and net per period over the whole history
    pub fn accounting(&self, granularity: Granularity) -> LedgerResult<AccountingReport> {
        let book = self.storage.read()?;
        Ok(AccountingReport::generate(
            book.transactions.all(),
            granularity,
        ))
    }

    /// Per-currency totals and breakdowns for `range`
    pub fn dashboard(&self, range: DateRange) -> LedgerResult<DashboardSummary> {
        let book = self.storage.read()?;
        Ok(DashboardSummary::generate(
            book.wallets.all(),
            book.transactions.all(),
            range,
        ))
    }

    /// Budget status for the current UTC month
    pub fn budget_status(&self, method: BudgetMethod) -> LedgerResult<BudgetStatus> {
        let book = self.storage.read()?;
        Ok(BudgetStatus::generate(
            book.transactions.all(),
            &book.limits,
            method,
            Utc::now().date_naive(),
        ))
    }
}
