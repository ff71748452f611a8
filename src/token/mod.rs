//! ERC-20 style fungible token
//!
//! The value-transfer medium multisig wallets draw on:
//! - Balances per address
//! - Transfer with overdraft protection
//! - The [`Ledger`] capability consumed by wallets
//!
//! # Example
//!
//! ```ignore
//! use multisig_factory::token::{Ledger, Token};
//!
//! let mut token = Token::deploy("IDris Token", "IDT", 18, 1_000, "alice")?;
//! token.transfer("alice", "bob", 100)?;
//! assert_eq!(token.balance_of("bob"), 100);
//! ```

pub mod ledger;
pub mod token;

pub use ledger::Ledger;
pub use token::{Token, TokenError, TokenMetadata, TransferEvent};
