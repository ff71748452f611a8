//! Multi-approver wallet
//!
//! An M-of-N wallet where M distinct approvers out of N must sign off on
//! every outbound transfer, and on any change to M itself.
//!
//! # Example
//!
//! ```ignore
//! use multisig_factory::multisig::{MultisigConfig, MultisigWallet};
//!
//! // Create a 2-of-3 wallet
//! let config = MultisigConfig::new(2, vec![alice, bob, carol])?;
//! let mut wallet = MultisigWallet::new(address, config);
//!
//! // Alice proposes (and implicitly approves) a transfer
//! let id = wallet.propose_transfer(&mut token, &alice, 100, &recipient)?;
//!
//! // Bob's approval reaches quorum and the transfer executes
//! wallet.approve_transfer(&mut token, &bob, id)?;
//! ```

pub mod threshold;
pub mod transaction;
pub mod wallet;

pub use threshold::{ThresholdProposal, ThresholdStatus};
pub use transaction::{ApprovalStatus, Transaction};
pub use wallet::{MultisigConfig, MultisigError, MultisigWallet, SupersedePolicy};
