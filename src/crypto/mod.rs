//! Cryptographic utilities
//!
//! Only hashing is needed: approvals are authorized by caller identity,
//! not by signatures.

pub mod hash;

pub use hash::{derive_address, sha256, sha256_hex};
