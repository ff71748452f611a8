//! Proposed transfers awaiting approval
//!
//! Each entry in a wallet's transaction log records who asked for the
//! transfer, who has signed off on it, and whether it has executed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of a successful approval vote
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApprovalStatus {
    /// Vote recorded, quorum not reached yet
    Pending { approvals: usize, required: u32 },
    /// Vote reached quorum and the transfer was performed
    Executed,
}

/// A transfer request in a wallet's append-only log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// 1-based position in the log
    pub id: u64,
    /// Amount to move
    pub amount: u128,
    /// Destination address
    pub recipient: String,
    /// Approver who proposed the transfer
    pub initiator: String,
    /// Approvers who have voted, the initiator included
    approved_by: BTreeSet<String>,
    /// Set once the transfer has been performed
    pub executed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// When the transfer was performed
    pub executed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a new transaction; the initiator's vote is already counted
    pub fn new(id: u64, amount: u128, recipient: String, initiator: String) -> Self {
        let mut approved_by = BTreeSet::new();
        approved_by.insert(initiator.clone());

        Self {
            id,
            amount,
            recipient,
            initiator,
            approved_by,
            executed: false,
            created_at: Utc::now(),
            executed_at: None,
        }
    }

    /// Number of distinct approvers who have signed off
    pub fn approval_count(&self) -> usize {
        self.approved_by.len()
    }

    /// Whether `approver` has already voted on this transaction
    pub fn has_approved(&self, approver: &str) -> bool {
        self.approved_by.contains(approver)
    }

    /// Approvers who have voted, in sorted order
    pub fn approved_by(&self) -> impl Iterator<Item = &str> {
        self.approved_by.iter().map(String::as_str)
    }

    /// Record a vote. Returns `false` if `approver` already voted.
    pub(crate) fn record_approval(&mut self, approver: &str) -> bool {
        self.approved_by.insert(approver.to_string())
    }

    /// Mark as executed; never reverts
    pub(crate) fn mark_executed(&mut self) {
        self.executed = true;
        self.executed_at = Some(Utc::now());
    }
}
