//! Append-only JSONL audit log
//!
//! One JSON object per line. Lines are only ever appended; reading back
//! filters by entity kind or by the entity (or wallet) an entry touches.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{LedgerError, LedgerResult};

use super::entry::{AuditEntry, EntityType};

/// Which entries to read back
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Only entries about this kind of entity
    pub entity_type: Option<EntityType>,
    /// Only entries about this short id, or moving this wallet's balance
    pub touching: Option<String>,
    /// Keep only the newest N matches
    pub limit: Option<usize>,
}

impl AuditQuery {
    /// Match everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one entity kind
    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// Restrict to entries touching `id`
    pub fn touching(mut self, id: impl Into<String>) -> Self {
        self.touching = Some(id.into());
        self
    }

    /// Keep the newest `limit` matches
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, entry: &AuditEntry) -> bool {
        self.entity_type.map_or(true, |t| entry.entity_type == t)
            && self.touching.as_deref().map_or(true, |id| entry.touches(id))
    }
}

/// Writer and reader of the audit log file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Log to `log_path`; the file is created on the first entry
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a single line
    pub fn log(&self, entry: &AuditEntry) -> LedgerResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LedgerError::Io(format!("Failed to open audit log: {}", e)))?;
        file.write_all(&line)
            .and_then(|()| file.flush())
            .map_err(|e| LedgerError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Matching entries, oldest first
    ///
    /// Lines that do not parse are skipped with a warning so one torn write
    /// does not hide the rest of the history.
    pub fn query(&self, query: &AuditQuery) -> LedgerResult<Vec<AuditEntry>> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.log_path)
            .map_err(|e| LedgerError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut matches = VecDeque::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: AuditEntry = match serde_json::from_str(&line) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping unreadable audit entry");
                    continue;
                }
            };
            if !query.matches(&entry) {
                continue;
            }
            if query.limit == Some(matches.len()) {
                matches.pop_front();
            }
            if query.limit != Some(0) {
                matches.push_back(entry);
            }
        }

        Ok(matches.into())
    }

    /// Check if anything has been logged yet
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Location of the log file
    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
