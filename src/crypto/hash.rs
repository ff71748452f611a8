//! Hashing utilities
//!
//! SHA-256 helpers used to derive deterministic ledger addresses for
//! tokens and factory-created wallets.

use sha2::{Digest, Sha256};

/// Number of hex characters in a derived address (20 bytes)
const ADDRESS_HEX_LEN: usize = 40;

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Computes SHA-256 hash and returns it as a hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Derive a `0x`-prefixed, 20-byte address from an arbitrary seed string
///
/// The same seed always yields the same address.
pub fn derive_address(seed: &str) -> String {
    let hex = sha256_hex(seed.as_bytes());
    format!("0x{}", &hex[..ADDRESS_HEX_LEN])
}
