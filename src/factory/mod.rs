//! Multisig wallet factory
//!
//! Creates independent wallets and keeps an append-only registry of them,
//! addressable by creation index.
//!
//! # Example
//!
//! ```ignore
//! use multisig_factory::factory::MultisigFactory;
//!
//! let mut factory = MultisigFactory::new();
//! let first = factory.create_wallet(2, vec![alice, bob, carol])?;
//! let second = factory.create_wallet(3, vec![bob, carol, dave, erin])?;
//!
//! assert_eq!(first.index, 0);
//! let wallet = factory.get_wallet(second.index)?;
//! ```

pub mod registry;

pub use registry::{MultisigFactory, WalletHandle, DEFAULT_NAMESPACE};
