//! Multisig Factory: multi-approver wallets in Rust
//!
//! This crate provides:
//! - M-of-N wallets that execute a transfer once M distinct approvers sign off
//! - Quorum-gated changes to a wallet's own threshold
//! - A factory that creates independent wallets and indexes them by creation order
//! - An ERC-20 style token acting as the balance ledger wallets draw on
//! - JSON persistence of factory and ledger state
//!
//! # Example
//!
//! ```rust
//! use multisig_factory::factory::MultisigFactory;
//! use multisig_factory::token::Token;
//!
//! let approvers: Vec<String> = ["alice", "bob", "carol"].iter().map(|s| s.to_string()).collect();
//!
//! let mut token = Token::deploy("IDris Token", "IDT", 18, 1_000, "alice").unwrap();
//! let mut factory = MultisigFactory::new();
//!
//! // Create a 2-of-3 wallet and fund it
//! let handle = factory.create_wallet(2, approvers).unwrap();
//! token.transfer("alice", &handle.address, 500).unwrap();
//!
//! // Alice proposes, Bob's approval executes the transfer
//! let wallet = factory.get_wallet_mut(handle.index).unwrap();
//! let id = wallet.propose_transfer(&mut token, "alice", 100, "dave").unwrap();
//! wallet.approve_transfer(&mut token, "bob", id).unwrap();
//!
//! assert_eq!(token.balance_of("dave"), 100);
//! assert_eq!(token.balance_of(&handle.address), 400);
//! ```

pub mod cli;
pub mod crypto;
pub mod factory;
pub mod multisig;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use factory::{MultisigFactory, WalletHandle};
pub use multisig::{
    ApprovalStatus, MultisigConfig, MultisigError, MultisigWallet, SupersedePolicy,
    ThresholdProposal, ThresholdStatus, Transaction,
};
pub use storage::{Snapshot, Storage, StorageConfig};
pub use token::{Ledger, Token, TokenError};
