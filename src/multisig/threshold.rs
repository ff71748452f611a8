//! Quorum-gated threshold changes
//!
//! A wallet has at most one outstanding threshold proposal. Proposing the
//! value already on the table counts as a vote for it; proposing a
//! different value supersedes it (subject to [`SupersedePolicy`]).

use crate::multisig::wallet::{MultisigError, MultisigWallet, SupersedePolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of a successful threshold vote
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ThresholdStatus {
    /// Vote recorded, proposal still short of quorum
    Pending {
        proposed: u32,
        approvals: usize,
        required: u32,
    },
    /// Proposal reached quorum and replaced the threshold
    Applied { previous: u32, current: u32 },
}

/// An outstanding request to change a wallet's threshold
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ThresholdProposal {
    /// Requested threshold
    pub proposed: u32,
    /// Approver who opened the proposal
    pub proposer: String,
    approved_by: BTreeSet<String>,
    pub proposed_at: DateTime<Utc>,
}

impl ThresholdProposal {
    fn new(proposed: u32, proposer: &str) -> Self {
        let mut approved_by = BTreeSet::new();
        approved_by.insert(proposer.to_string());

        Self {
            proposed,
            proposer: proposer.to_string(),
            approved_by,
            proposed_at: Utc::now(),
        }
    }

    /// Number of distinct approvers backing this proposal
    pub fn approval_count(&self) -> usize {
        self.approved_by.len()
    }

    /// Whether `approver` has voted for this proposal
    pub fn has_approved(&self, approver: &str) -> bool {
        self.approved_by.contains(approver)
    }

    /// Approvers backing this proposal, in sorted order
    pub fn approved_by(&self) -> impl Iterator<Item = &str> {
        self.approved_by.iter().map(String::as_str)
    }
}

impl MultisigWallet {
    /// Propose `new_threshold`, or vote for it if it is already proposed
    ///
    /// Once the proposal has as many votes as the current threshold, it
    /// replaces the threshold and is cleared. Lowering the threshold does
    /// not touch the ledger: pending transactions that now have enough
    /// votes show up in [`ready_transactions`](Self::ready_transactions)
    /// and execute on their next vote or `execute_transfer` call.
    pub fn propose_threshold(
        &mut self,
        caller: &str,
        new_threshold: u32,
    ) -> Result<ThresholdStatus, MultisigError> {
        self.require_approver(caller)?;

        let current = self.threshold();
        if new_threshold == current {
            return Err(MultisigError::NoChangeRequested(current));
        }

        let approver_count = self.approver_count();
        if new_threshold == 0 || new_threshold as usize > approver_count {
            return Err(MultisigError::InvalidThreshold {
                threshold: new_threshold,
                approvers: approver_count,
            });
        }

        let policy = self.config.supersede;
        let approvals = match &mut self.threshold_proposal {
            Some(proposal) if proposal.proposed == new_threshold => {
                if !proposal.approved_by.insert(caller.to_string()) {
                    return Err(MultisigError::AlreadyVoted(caller.to_string()));
                }
                proposal.approval_count()
            }
            slot => {
                if let Some(existing) = slot.as_ref() {
                    if policy == SupersedePolicy::Reject {
                        return Err(MultisigError::ProposalPending(existing.proposed));
                    }
                    log::info!(
                        "Threshold proposal {} superseded by {} from {}",
                        existing.proposed,
                        new_threshold,
                        caller
                    );
                }
                *slot = Some(ThresholdProposal::new(new_threshold, caller));
                1
            }
        };

        log::debug!(
            "Wallet {}: {} backs threshold {} ({}/{})",
            self.address,
            caller,
            new_threshold,
            approvals,
            current
        );

        if approvals < current as usize {
            return Ok(ThresholdStatus::Pending {
                proposed: new_threshold,
                approvals,
                required: current,
            });
        }

        self.threshold_proposal = None;
        self.config.threshold = new_threshold;
        log::info!(
            "Wallet {}: threshold changed {} -> {}",
            self.address,
            current,
            new_threshold
        );

        let ready = self.ready_transactions().len();
        if ready > 0 {
            log::warn!(
                "Wallet {}: {} pending transaction(s) now meet threshold {} and await execution",
                self.address,
                ready,
                new_threshold
            );
        }

        Ok(ThresholdStatus::Applied {
            previous: current,
            current: new_threshold,
        })
    }

    /// Vote for a threshold change; same as [`propose_threshold`](Self::propose_threshold)
    pub fn approve_threshold(
        &mut self,
        caller: &str,
        new_threshold: u32,
    ) -> Result<ThresholdStatus, MultisigError> {
        self.propose_threshold(caller, new_threshold)
    }

    /// Withdraw the outstanding threshold proposal. Only its proposer may.
    pub fn cancel_threshold_proposal(
        &mut self,
        caller: &str,
    ) -> Result<ThresholdProposal, MultisigError> {
        self.require_approver(caller)?;

        match self.threshold_proposal.take() {
            None => Err(MultisigError::NoPendingProposal),
            Some(proposal) if proposal.proposer != caller => {
                self.threshold_proposal = Some(proposal);
                Err(MultisigError::Unauthorized(caller.to_string()))
            }
            Some(proposal) => {
                log::info!(
                    "Wallet {}: threshold proposal {} cancelled by {}",
                    self.address,
                    proposal.proposed,
                    caller
                );
                Ok(proposal)
            }
        }
    }
}
