//! Audit log for FlowLedger
//!
//! Every mutation of the book (wallet created, transaction recorded or
//! deleted, budget limit or method changed) is appended to a JSONL file with
//! the affected entity's snapshot.
//!
//! - `AuditEntry`: one record with timestamp, operation, entity and values.
//! - `AuditLogger`: appends entries to the log file and reads them back
//!   through an `AuditQuery` (entity kind, touched entity or wallet, limit).

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::{AuditLogger, AuditQuery};
