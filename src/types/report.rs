//! Per-user outcomes of batch operations
//!
//! Every add/remove batch returns a [`BatchReport`] holding one
//! [`OperationRecord`] per input uid, in input order.

use serde::{Deserialize, Serialize};

/// How a single user was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// The site confirmed the change
    Succeeded,
    /// The site answered but did not confirm the change
    Rejected,
    /// Already present in the target list, no request sent
    Skipped,
    /// Checked and intentionally left in place
    Retained,
    /// The request itself failed
    Failed,
}

impl OperationStatus {
    /// Counted as a success in batch summaries
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Rejected | Self::Failed)
    }
}

/// Outcome for one uid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub uid: String,
    pub status: OperationStatus,
    /// Site reply or error text
    pub message: String,
}

impl OperationRecord {
    pub fn new(uid: impl Into<String>, status: OperationStatus, message: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            status,
            message: message.into(),
        }
    }

    pub fn skipped(uid: impl Into<String>) -> Self {
        Self::new(uid, OperationStatus::Skipped, "already in list")
    }

    pub fn failed(uid: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::new(uid, OperationStatus::Failed, error.to_string())
    }
}

/// Ordered outcomes of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<OperationRecord>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: OperationRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records that did not fail and were not rejected
    pub fn success_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status.is_success())
            .count()
    }

    /// Number of records with the given status
    pub fn count(&self, status: OperationStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Latest record for a uid
    pub fn get(&self, uid: &str) -> Option<&OperationRecord> {
        self.records.iter().rev().find(|r| r.uid == uid)
    }
}
