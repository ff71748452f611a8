//! Multi-approver wallet implementation
//!
//! Holds a balance on an external [`Ledger`] and only releases it once
//! `threshold` distinct approvers have signed off on a transfer.

use crate::multisig::threshold::ThresholdProposal;
use crate::multisig::transaction::{ApprovalStatus, Transaction};
use crate::token::{Ledger, TokenError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to multisig operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultisigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Not an approver: {0}")]
    Unauthorized(String),
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: u128, requested: u128 },
    #[error("Transaction not found: {0}")]
    TransactionNotFound(u64),
    #[error("Wallet not found at index {0}")]
    WalletNotFound(usize),
    #[error("Transaction {0} already executed")]
    AlreadyExecuted(u64),
    #[error("Already voted: {0}")]
    AlreadyVoted(String),
    #[error("Invalid threshold {threshold}: must be between 1 and {approvers}")]
    InvalidThreshold { threshold: u32, approvers: usize },
    #[error("Threshold is already {0}")]
    NoChangeRequested(u32),
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Invalid recipient: {0:?}")]
    InvalidRecipient(String),
    #[error("Insufficient approvals: have {have}, need {need}")]
    InsufficientApprovals { have: usize, need: u32 },
    #[error("Threshold proposal for {0} is still pending")]
    ProposalPending(u32),
    #[error("No threshold proposal is pending")]
    NoPendingProposal,
    #[error("Ledger error: {0}")]
    Ledger(#[from] TokenError),
}

/// What happens when an approver proposes a threshold while a proposal
/// for a different value is outstanding
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SupersedePolicy {
    /// The new proposal replaces the old one and its votes
    #[default]
    Replace,
    /// The new proposal is refused until the old one is applied or cancelled
    Reject,
}

/// Configuration for a multisig wallet
///
/// Deserializing goes through [`MultisigConfig::new`], so a stored config
/// that breaks the approver or threshold rules is refused on load.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StoredConfig")]
pub struct MultisigConfig {
    /// Distinct approvals required to execute (M in M-of-N)
    pub threshold: u32,
    /// Authorized approvers (N), in the order they were given
    pub approvers: Vec<String>,
    /// Handling of competing threshold proposals
    pub supersede: SupersedePolicy,
}

/// On-disk shape of [`MultisigConfig`], validated before use
#[derive(Deserialize)]
struct StoredConfig {
    threshold: u32,
    approvers: Vec<String>,
    #[serde(default)]
    supersede: SupersedePolicy,
}

impl TryFrom<StoredConfig> for MultisigConfig {
    type Error = MultisigError;

    fn try_from(stored: StoredConfig) -> Result<Self, Self::Error> {
        Ok(MultisigConfig::new(stored.threshold, stored.approvers)?
            .with_supersede_policy(stored.supersede))
    }
}

impl MultisigConfig {
    /// Create a new multisig configuration
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `approvers` is empty or contains a
    /// duplicate, or if `threshold` is outside `1..=approvers.len()`.
    pub fn new(threshold: u32, approvers: Vec<String>) -> Result<Self, MultisigError> {
        if approvers.is_empty() {
            return Err(MultisigError::InvalidConfiguration(
                "at least one approver is required".to_string(),
            ));
        }

        if threshold == 0 {
            return Err(MultisigError::InvalidConfiguration(
                "threshold must be at least 1".to_string(),
            ));
        }

        if threshold as usize > approvers.len() {
            return Err(MultisigError::InvalidConfiguration(format!(
                "threshold {} exceeds approver count {}",
                threshold,
                approvers.len()
            )));
        }

        let mut sorted = approvers.clone();
        sorted.sort();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(MultisigError::InvalidConfiguration(format!(
                    "duplicate approver {}",
                    pair[0]
                )));
            }
        }

        Ok(Self {
            threshold,
            approvers,
            supersede: SupersedePolicy::default(),
        })
    }

    /// Set how competing threshold proposals are handled
    pub fn with_supersede_policy(mut self, policy: SupersedePolicy) -> Self {
        self.supersede = policy;
        self
    }

    /// Get the threshold (M)
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Get the total approver count (N)
    pub fn approver_count(&self) -> usize {
        self.approvers.len()
    }

    /// Check if an identity is an authorized approver
    pub fn is_approver(&self, identity: &str) -> bool {
        self.approvers.iter().any(|a| a == identity)
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.threshold, self.approvers.len())
    }
}

/// A multi-approver wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigWallet {
    /// Address the wallet's funds are held under on the ledger
    pub(crate) address: String,
    /// Wallet configuration
    pub(crate) config: MultisigConfig,
    /// Transaction log; entry `i` has id `i + 1`
    transactions: Vec<Transaction>,
    /// Outstanding threshold change, if any
    pub(crate) threshold_proposal: Option<ThresholdProposal>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl MultisigWallet {
    /// Create a new multisig wallet holding funds under `address`
    pub fn new(address: String, config: MultisigConfig) -> Self {
        Self {
            address,
            config,
            transactions: Vec::new(),
            threshold_proposal: None,
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// Get the wallet address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the configuration
    pub fn config(&self) -> &MultisigConfig {
        &self.config
    }

    /// Get the required threshold
    pub fn threshold(&self) -> u32 {
        self.config.threshold
    }

    /// Get the total number of approvers
    pub fn approver_count(&self) -> usize {
        self.config.approver_count()
    }

    /// Authorized approvers
    pub fn approvers(&self) -> &[String] {
        &self.config.approvers
    }

    /// Check if an identity is an authorized approver
    pub fn is_approver(&self, identity: &str) -> bool {
        self.config.is_approver(identity)
    }

    /// Number of transactions ever proposed
    pub fn transaction_count(&self) -> u64 {
        self.transactions.len() as u64
    }

    /// Look up a transaction by its 1-based id
    pub fn transaction(&self, id: u64) -> Result<&Transaction, MultisigError> {
        let index = self.index_of(id)?;
        Ok(&self.transactions[index])
    }

    /// Full transaction log in proposal order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions still awaiting execution
    pub fn pending_transactions(&self) -> Vec<&Transaction> {
        self.transactions.iter().filter(|tx| !tx.executed).collect()
    }

    /// Unexecuted transactions whose votes already meet the threshold
    ///
    /// Non-empty after a failed execution at quorum, or after the threshold
    /// was lowered below a pending transaction's vote count. Either case is
    /// settled by [`execute_transfer`](Self::execute_transfer) or another vote.
    pub fn ready_transactions(&self) -> Vec<&Transaction> {
        let required = self.threshold() as usize;
        self.transactions
            .iter()
            .filter(|tx| !tx.executed && tx.approval_count() >= required)
            .collect()
    }

    /// Outstanding threshold proposal, if any
    pub fn threshold_proposal(&self) -> Option<&ThresholdProposal> {
        self.threshold_proposal.as_ref()
    }

    /// Get human-readable description
    pub fn description(&self) -> String {
        self.config.description()
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    /// Propose a transfer of `amount` to `recipient`
    ///
    /// The caller's vote is counted immediately, so a 1-of-N wallet
    /// executes within this call. Returns the new transaction id.
    pub fn propose_transfer<L: Ledger>(
        &mut self,
        ledger: &mut L,
        caller: &str,
        amount: u128,
        recipient: &str,
    ) -> Result<u64, MultisigError> {
        self.require_approver(caller)?;

        if amount == 0 {
            return Err(MultisigError::InvalidAmount);
        }

        if recipient.is_empty() || recipient == self.address {
            return Err(MultisigError::InvalidRecipient(recipient.to_string()));
        }

        let available = ledger.balance_of(&self.address);
        if available < amount {
            return Err(MultisigError::InsufficientFunds {
                available,
                requested: amount,
            });
        }

        let id = self.transactions.len() as u64 + 1;
        self.transactions.push(Transaction::new(
            id,
            amount,
            recipient.to_string(),
            caller.to_string(),
        ));

        log::info!(
            "Wallet {}: transaction {} proposed by {} ({} to {})",
            self.address,
            id,
            caller,
            amount,
            recipient
        );

        if self.threshold() <= 1 {
            let index = self.transactions.len() - 1;
            if let Err(e) = self.execute(ledger, index) {
                // Nobody else can have voted yet, so the proposal is undone whole
                self.transactions.pop();
                return Err(e);
            }
        }

        Ok(id)
    }

    /// Approve transaction `id`, executing it if this vote reaches quorum
    ///
    /// If quorum is reached but the transfer cannot be performed, the vote
    /// is kept, the transaction stays unexecuted and the failure is
    /// returned. A later vote or [`execute_transfer`](Self::execute_transfer)
    /// retries it.
    pub fn approve_transfer<L: Ledger>(
        &mut self,
        ledger: &mut L,
        caller: &str,
        id: u64,
    ) -> Result<ApprovalStatus, MultisigError> {
        self.require_approver(caller)?;
        let index = self.index_of(id)?;
        let required = self.threshold();

        let tx = &mut self.transactions[index];
        if tx.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        if !tx.record_approval(caller) {
            return Err(MultisigError::AlreadyVoted(caller.to_string()));
        }

        let approvals = tx.approval_count();
        log::debug!(
            "Wallet {}: {} approved transaction {} ({}/{})",
            self.address,
            caller,
            id,
            approvals,
            required
        );

        if approvals < required as usize {
            return Ok(ApprovalStatus::Pending {
                approvals,
                required,
            });
        }

        self.execute(ledger, index)?;
        Ok(ApprovalStatus::Executed)
    }

    /// Retry execution of a transaction that already has quorum
    pub fn execute_transfer<L: Ledger>(
        &mut self,
        ledger: &mut L,
        caller: &str,
        id: u64,
    ) -> Result<(), MultisigError> {
        self.require_approver(caller)?;
        let index = self.index_of(id)?;
        let tx = &self.transactions[index];

        if tx.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        let need = self.threshold();
        if tx.approval_count() < need as usize {
            return Err(MultisigError::InsufficientApprovals {
                have: tx.approval_count(),
                need,
            });
        }

        self.execute(ledger, index)
    }

    /// Perform the transfer for the transaction at `index` and mark it
    /// executed. Leaves the transaction untouched on failure.
    fn execute<L: Ledger>(&mut self, ledger: &mut L, index: usize) -> Result<(), MultisigError> {
        let (id, amount, recipient) = {
            let tx = &self.transactions[index];
            (tx.id, tx.amount, tx.recipient.clone())
        };

        let available = ledger.balance_of(&self.address);
        if available < amount {
            log::warn!(
                "Wallet {}: transaction {} reached quorum but balance is {} (needs {})",
                self.address,
                id,
                available,
                amount
            );
            return Err(MultisigError::InsufficientFunds {
                available,
                requested: amount,
            });
        }

        if let Err(e) = ledger.transfer(&self.address, &recipient, amount) {
            log::warn!(
                "Wallet {}: ledger refused transaction {}: {}",
                self.address,
                id,
                e
            );
            return Err(e.into());
        }

        self.transactions[index].mark_executed();
        log::info!(
            "Wallet {}: transaction {} executed ({} to {})",
            self.address,
            id,
            amount,
            recipient
        );

        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub(crate) fn require_approver(&self, caller: &str) -> Result<(), MultisigError> {
        if self.is_approver(caller) {
            Ok(())
        } else {
            Err(MultisigError::Unauthorized(caller.to_string()))
        }
    }

    fn index_of(&self, id: u64) -> Result<usize, MultisigError> {
        if id == 0 || id > self.transactions.len() as u64 {
            return Err(MultisigError::TransactionNotFound(id));
        }
        Ok((id - 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TransferEvent};

    const RECIPIENT: &str = "recipient";

    fn approvers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    /// A wallet with the given config whose address holds `balance` tokens
    fn funded_wallet(threshold: u32, names: &[&str], balance: u128) -> (MultisigWallet, Token) {
        let config = MultisigConfig::new(threshold, approvers(names)).unwrap();
        let wallet = MultisigWallet::new("0xwallet".to_string(), config);
        let mut token = Token::deploy("IDris Token", "IDT", 18, 1_000_000, "treasury").unwrap();
        token.transfer("treasury", wallet.address(), balance).unwrap();
        (wallet, token)
    }

    /// Ledger that reports a balance but refuses every transfer
    struct FrozenLedger(u128);

    impl Ledger for FrozenLedger {
        fn balance_of(&self, _holder: &str) -> u128 {
            self.0
        }

        fn transfer(
            &mut self,
            _from: &str,
            _to: &str,
            amount: u128,
        ) -> Result<TransferEvent, TokenError> {
            Err(TokenError::InsufficientBalance {
                have: 0,
                need: amount,
            })
        }
    }

    #[test]
    fn test_config_creation() {
        let config = MultisigConfig::new(2, approvers(&["a", "b", "c"])).unwrap();

        assert_eq!(config.threshold(), 2);
        assert_eq!(config.approver_count(), 3);
        assert_eq!(config.description(), "2-of-3");
        assert_eq!(config.supersede, SupersedePolicy::Replace);
        assert!(config.is_approver("b"));
        assert!(!config.is_approver("d"));
    }

    #[test]
    fn test_config_validation() {
        // No approvers
        assert!(matches!(
            MultisigConfig::new(1, vec![]),
            Err(MultisigError::InvalidConfiguration(_))
        ));

        // Zero threshold
        assert!(matches!(
            MultisigConfig::new(0, approvers(&["a", "b"])),
            Err(MultisigError::InvalidConfiguration(_))
        ));

        // Threshold > approvers
        assert!(matches!(
            MultisigConfig::new(3, approvers(&["a", "b"])),
            Err(MultisigError::InvalidConfiguration(_))
        ));

        // Duplicate approvers
        assert!(matches!(
            MultisigConfig::new(1, approvers(&["a", "b", "a"])),
            Err(MultisigError::InvalidConfiguration(_))
        ));

        // A single approver is a valid 1-of-1
        assert!(MultisigConfig::new(1, approvers(&["a"])).is_ok());
    }

    #[test]
    fn test_config_deserialize_validates() {
        let config = MultisigConfig::new(2, approvers(&["a", "b"]))
            .unwrap()
            .with_supersede_policy(SupersedePolicy::Reject);
        let json = serde_json::to_string(&config).unwrap();
        let restored: MultisigConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);

        let zero = r#"{"threshold":0,"approvers":["a","b"]}"#;
        assert!(serde_json::from_str::<MultisigConfig>(zero).is_err());

        let duplicate = r#"{"threshold":1,"approvers":["a","a"]}"#;
        assert!(serde_json::from_str::<MultisigConfig>(duplicate).is_err());

        let too_high = r#"{"threshold":3,"approvers":["a","b"]}"#;
        assert!(serde_json::from_str::<MultisigConfig>(too_high).is_err());

        // Older files without a policy fall back to the default
        let legacy = r#"{"threshold":1,"approvers":["a"]}"#;
        let legacy: MultisigConfig = serde_json::from_str(legacy).unwrap();
        assert_eq!(legacy.supersede, SupersedePolicy::Replace);
    }

    #[test]
    fn test_wallet_creation() {
        let (wallet, _) = funded_wallet(2, &["a", "b", "c"], 500);

        assert_eq!(wallet.threshold(), 2);
        assert_eq!(wallet.approver_count(), 3);
        assert_eq!(wallet.transaction_count(), 0);
        assert!(wallet.threshold_proposal().is_none());
        assert_eq!(wallet.description(), "2-of-3");
    }

    #[test]
    fn test_propose_then_approve_executes() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b", "c"], 500);

        let id = wallet.propose_transfer(&mut token, "a", 100, RECIPIENT).unwrap();
        assert_eq!(id, 1);

        let tx = wallet.transaction(1).unwrap();
        assert_eq!(tx.approval_count(), 1);
        assert_eq!(tx.initiator, "a");
        assert!(!tx.executed);
        assert_eq!(token.balance_of(RECIPIENT), 0);

        let status = wallet.approve_transfer(&mut token, "b", 1).unwrap();
        assert_eq!(status, ApprovalStatus::Executed);

        let tx = wallet.transaction(1).unwrap();
        assert_eq!(tx.approval_count(), 2);
        assert!(tx.executed);
        assert_eq!(token.balance_of(RECIPIENT), 100);
        assert_eq!(token.balance_of(wallet.address()), 400);
    }

    #[test]
    fn test_approve_below_quorum_is_pending() {
        let (mut wallet, mut token) = funded_wallet(3, &["a", "b", "c", "d"], 500);

        wallet.propose_transfer(&mut token, "b", 100, RECIPIENT).unwrap();
        let status = wallet.approve_transfer(&mut token, "c", 1).unwrap();

        assert_eq!(
            status,
            ApprovalStatus::Pending {
                approvals: 2,
                required: 3
            }
        );
        assert_eq!(token.balance_of(RECIPIENT), 0);

        let status = wallet.approve_transfer(&mut token, "d", 1).unwrap();
        assert_eq!(status, ApprovalStatus::Executed);
        assert_eq!(token.balance_of(wallet.address()), 400);
    }

    #[test]
    fn test_single_approver_executes_on_proposal() {
        let (mut wallet, mut token) = funded_wallet(1, &["a", "b"], 500);

        let id = wallet.propose_transfer(&mut token, "a", 200, RECIPIENT).unwrap();

        assert!(wallet.transaction(id).unwrap().executed);
        assert_eq!(token.balance_of(RECIPIENT), 200);
    }

    #[test]
    fn test_initiator_cannot_approve_own_transaction() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b", "c"], 500);

        wallet.propose_transfer(&mut token, "a", 100, RECIPIENT).unwrap();
        let result = wallet.approve_transfer(&mut token, "a", 1);

        assert_eq!(result, Err(MultisigError::AlreadyVoted("a".to_string())));
        assert_eq!(wallet.transaction(1).unwrap().approval_count(), 1);
    }

    #[test]
    fn test_double_vote_rejected() {
        let (mut wallet, mut token) = funded_wallet(3, &["a", "b", "c"], 500);

        wallet.propose_transfer(&mut token, "a", 100, RECIPIENT).unwrap();
        wallet.approve_transfer(&mut token, "b", 1).unwrap();
        let result = wallet.approve_transfer(&mut token, "b", 1);

        assert!(matches!(result, Err(MultisigError::AlreadyVoted(_))));
        assert_eq!(wallet.transaction(1).unwrap().approval_count(), 2);
    }

    #[test]
    fn test_propose_more_than_balance() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b", "c"], 500);

        let result = wallet.propose_transfer(&mut token, "a", 600, RECIPIENT);

        assert_eq!(
            result,
            Err(MultisigError::InsufficientFunds {
                available: 500,
                requested: 600
            })
        );
        assert_eq!(wallet.transaction_count(), 0);
    }

    #[test]
    fn test_propose_validation() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b", "c"], 500);

        assert_eq!(
            wallet.propose_transfer(&mut token, "mallory", 10, RECIPIENT),
            Err(MultisigError::Unauthorized("mallory".to_string()))
        );
        assert_eq!(
            wallet.propose_transfer(&mut token, "a", 0, RECIPIENT),
            Err(MultisigError::InvalidAmount)
        );
        assert!(matches!(
            wallet.propose_transfer(&mut token, "a", 10, ""),
            Err(MultisigError::InvalidRecipient(_))
        ));
        assert!(matches!(
            wallet.propose_transfer(&mut token, "a", 10, "0xwallet"),
            Err(MultisigError::InvalidRecipient(_))
        ));
        assert_eq!(wallet.transaction_count(), 0);
    }

    #[test]
    fn test_approve_errors() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b", "c"], 500);
        wallet.propose_transfer(&mut token, "a", 100, RECIPIENT).unwrap();

        assert_eq!(
            wallet.approve_transfer(&mut token, "mallory", 1),
            Err(MultisigError::Unauthorized("mallory".to_string()))
        );
        assert_eq!(
            wallet.approve_transfer(&mut token, "b", 0),
            Err(MultisigError::TransactionNotFound(0))
        );
        assert_eq!(
            wallet.approve_transfer(&mut token, "b", 2),
            Err(MultisigError::TransactionNotFound(2))
        );

        wallet.approve_transfer(&mut token, "b", 1).unwrap();
        assert_eq!(
            wallet.approve_transfer(&mut token, "c", 1),
            Err(MultisigError::AlreadyExecuted(1))
        );

        // Executed transactions stay executed with their final vote count
        let tx = wallet.transaction(1).unwrap();
        assert!(tx.executed);
        assert_eq!(tx.approval_count(), 2);
        assert!(!tx.has_approved("c"));
    }

    #[test]
    fn test_failed_execution_keeps_vote() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b", "c"], 500);

        wallet.propose_transfer(&mut token, "a", 300, RECIPIENT).unwrap();
        wallet.propose_transfer(&mut token, "a", 300, RECIPIENT).unwrap();

        wallet.approve_transfer(&mut token, "b", 1).unwrap();
        assert_eq!(token.balance_of(wallet.address()), 200);

        let result = wallet.approve_transfer(&mut token, "b", 2);
        assert_eq!(
            result,
            Err(MultisigError::InsufficientFunds {
                available: 200,
                requested: 300
            })
        );

        let tx = wallet.transaction(2).unwrap();
        assert_eq!(tx.approval_count(), 2);
        assert!(tx.has_approved("b"));
        assert!(!tx.executed);

        // Replenish, then a third approver's vote retries execution
        token.transfer("treasury", wallet.address(), 100).unwrap();
        let status = wallet.approve_transfer(&mut token, "c", 2).unwrap();
        assert_eq!(status, ApprovalStatus::Executed);
        assert_eq!(token.balance_of(RECIPIENT), 600);
        assert_eq!(token.balance_of(wallet.address()), 0);
    }

    #[test]
    fn test_execute_transfer_retry() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b"], 500);

        wallet.propose_transfer(&mut token, "a", 400, RECIPIENT).unwrap();
        wallet.propose_transfer(&mut token, "b", 400, RECIPIENT).unwrap();
        wallet.approve_transfer(&mut token, "b", 1).unwrap();

        // Every approver has now voted on #2 but the balance is short
        assert!(wallet.approve_transfer(&mut token, "a", 2).is_err());
        assert!(matches!(
            wallet.execute_transfer(&mut token, "a", 2),
            Err(MultisigError::InsufficientFunds { .. })
        ));

        token.transfer("treasury", wallet.address(), 300).unwrap();
        wallet.execute_transfer(&mut token, "a", 2).unwrap();

        assert!(wallet.transaction(2).unwrap().executed);
        assert_eq!(
            wallet.execute_transfer(&mut token, "b", 2),
            Err(MultisigError::AlreadyExecuted(2))
        );
    }

    #[test]
    fn test_execute_transfer_needs_quorum() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b", "c"], 500);
        wallet.propose_transfer(&mut token, "a", 100, RECIPIENT).unwrap();

        assert_eq!(
            wallet.execute_transfer(&mut token, "a", 1),
            Err(MultisigError::InsufficientApprovals { have: 1, need: 2 })
        );
        assert_eq!(
            wallet.execute_transfer(&mut token, "mallory", 1),
            Err(MultisigError::Unauthorized("mallory".to_string()))
        );
        assert_eq!(
            wallet.execute_transfer(&mut token, "a", 9),
            Err(MultisigError::TransactionNotFound(9))
        );
    }

    #[test]
    fn test_ledger_refusal_surfaces() {
        let config = MultisigConfig::new(2, approvers(&["a", "b"])).unwrap();
        let mut wallet = MultisigWallet::new("0xwallet".to_string(), config);
        let mut ledger = FrozenLedger(1_000);

        wallet.propose_transfer(&mut ledger, "a", 100, RECIPIENT).unwrap();
        let result = wallet.approve_transfer(&mut ledger, "b", 1);

        assert!(matches!(result, Err(MultisigError::Ledger(_))));
        let tx = wallet.transaction(1).unwrap();
        assert!(!tx.executed);
        assert_eq!(tx.approval_count(), 2);
    }

    #[test]
    fn test_single_approver_ledger_refusal_is_atomic() {
        let config = MultisigConfig::new(1, approvers(&["a"])).unwrap();
        let mut wallet = MultisigWallet::new("0xwallet".to_string(), config);
        let mut ledger = FrozenLedger(1_000);

        let result = wallet.propose_transfer(&mut ledger, "a", 100, RECIPIENT);

        assert!(matches!(result, Err(MultisigError::Ledger(_))));
        assert_eq!(wallet.transaction_count(), 0);
    }

    #[test]
    fn test_pending_transactions() {
        let (mut wallet, mut token) = funded_wallet(2, &["a", "b", "c"], 500);

        wallet.propose_transfer(&mut token, "a", 100, RECIPIENT).unwrap();
        wallet.propose_transfer(&mut token, "b", 50, RECIPIENT).unwrap();
        wallet.approve_transfer(&mut token, "c", 1).unwrap();

        let pending: Vec<u64> = wallet.pending_transactions().iter().map(|t| t.id).collect();
        assert_eq!(pending, vec![2]);
        assert_eq!(wallet.transactions().len(), 2);
    }
}
