//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::BalanceChange;

/// Types of operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity replaced a previous value under the same key
    Upsert,
    /// Entity was deleted
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Upsert => write!(f, "UPSERT"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Part of the book an entry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Wallet,
    Transaction,
    BudgetLimit,
    BudgetMethod,
    Member,
}

impl EntityType {
    /// Parse an entity type as typed on the command line
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "wallet" => Some(Self::Wallet),
            "transaction" | "txn" => Some(Self::Transaction),
            "budgetlimit" | "limit" => Some(Self::BudgetLimit),
            "budgetmethod" | "method" => Some(Self::BudgetMethod),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Wallet => write!(f, "Wallet"),
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::BudgetLimit => write!(f, "BudgetLimit"),
            EntityType::BudgetMethod => write!(f, "BudgetMethod"),
            EntityType::Member => write!(f, "Member"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Short id of the entity, or the category for budget limits
    pub entity_id: String,

    /// Human-readable description of the entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Entity before the operation (upserts, deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Entity after the operation (creates, upserts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Wallet balances moved by a transaction being recorded or deleted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub balance_changes: Vec<BalanceChange>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            balance_changes: Vec::new(),
        }
    }

    /// Entry for a newly created entity
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Create, entity_type, entity_id.into(), entity_name);
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    /// Entry for a value that replaced `before` (if there was one)
    pub fn upsert<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: Option<&T>,
        after: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Upsert, entity_type, entity_id.into(), None);
        entry.before = before.and_then(|b| serde_json::to_value(b).ok());
        entry.after = serde_json::to_value(after).ok();
        entry
    }

    /// Entry for a deleted entity
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Delete, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    /// Attach the balance movements the operation caused
    pub fn with_balance_changes(mut self, changes: Vec<BalanceChange>) -> Self {
        self.balance_changes = changes;
        self
    }

    /// The entry is about `id`, or moved the balance of wallet `id`
    pub fn touches(&self, id: &str) -> bool {
        self.entity_id == id
            || self
                .balance_changes
                .iter()
                .any(|c| c.wallet_id.to_string() == id)
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }
        for change in &self.balance_changes {
            let sign = if change.delta.is_negative() { "" } else { "+" };
            output.push_str(&format!(
                "\n    {} {}{} -> {}",
                change.wallet_id, sign, change.delta, change.balance
            ));
        }

        output
    }
}
