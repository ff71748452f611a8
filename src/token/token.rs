//! ERC-20 style token implementation
//!
//! The fungible balance ledger that multisig wallets hold funds in.

use crate::crypto::derive_address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Maximum number of transfer events retained in history
const MAX_HISTORY: usize = 100;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Invalid address: cannot transfer to self")]
    SelfTransfer,
    #[error("Invalid symbol: must be 1-10 characters")]
    InvalidSymbol,
    #[error("Invalid name: must be 1-50 characters")]
    InvalidName,
    #[error("Invalid decimals: must be 0-18")]
    InvalidDecimals,
    #[error("Invalid supply: must be greater than 0")]
    InvalidSupply,
}

/// Token metadata (immutable after creation)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenMetadata {
    /// Token name (e.g., "IDris Token")
    pub name: String,
    /// Token symbol (e.g., "IDT")
    pub symbol: String,
    /// Decimal places (usually 18)
    pub decimals: u8,
    /// Total supply (fixed at creation)
    pub total_supply: u128,
    /// Creator address, credited with the whole supply
    pub creator: String,
    /// Timestamp when created
    pub created_at: DateTime<Utc>,
}

impl TokenMetadata {
    /// Create new token metadata with validation
    pub fn new(
        name: String,
        symbol: String,
        decimals: u8,
        total_supply: u128,
        creator: String,
    ) -> Result<Self, TokenError> {
        if name.is_empty() || name.len() > 50 {
            return Err(TokenError::InvalidName);
        }

        if symbol.is_empty() || symbol.len() > 10 {
            return Err(TokenError::InvalidSymbol);
        }

        if decimals > 18 {
            return Err(TokenError::InvalidDecimals);
        }

        if total_supply == 0 {
            return Err(TokenError::InvalidSupply);
        }

        Ok(Self {
            name,
            symbol,
            decimals,
            total_supply,
            creator,
            created_at: Utc::now(),
        })
    }
}

/// Transfer event (recorded when tokens move)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransferEvent {
    pub token: String,
    pub from: String,
    pub to: String,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

/// An ERC-20 style fungible token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Unique token address
    pub address: String,
    /// Token metadata
    pub metadata: TokenMetadata,
    /// Balances: address -> amount
    balances: HashMap<String, u128>,
    /// Transfer history (last 100)
    pub transfer_history: Vec<TransferEvent>,
}

impl Token {
    /// Create a new token with all supply allocated to creator
    pub fn new(address: String, metadata: TokenMetadata) -> Self {
        let mut balances = HashMap::new();
        balances.insert(metadata.creator.clone(), metadata.total_supply);

        Self {
            address,
            metadata,
            balances,
            transfer_history: Vec::new(),
        }
    }

    /// Validate metadata and create a token at an address derived from
    /// the creator and symbol
    pub fn deploy(
        name: &str,
        symbol: &str,
        decimals: u8,
        total_supply: u128,
        creator: &str,
    ) -> Result<Self, TokenError> {
        let metadata = TokenMetadata::new(
            name.to_string(),
            symbol.to_string(),
            decimals,
            total_supply,
            creator.to_string(),
        )?;
        let address = derive_address(&format!("{}:token:{}", creator, symbol));

        log::info!(
            "Token deployed: {} ({}) at {}, supply {} to {}",
            name,
            symbol,
            address,
            total_supply,
            creator
        );

        Ok(Self::new(address, metadata))
    }

    // =========================================================================
    // View Functions
    // =========================================================================

    /// Get token name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Get token symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Get decimal places
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Get total supply
    pub fn total_supply(&self) -> u128 {
        self.metadata.total_supply
    }

    /// Get balance of an address
    pub fn balance_of(&self, address: &str) -> u128 {
        *self.balances.get(address).unwrap_or(&0)
    }

    /// Get holder count
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    // =========================================================================
    // Mutating Functions
    // =========================================================================

    /// Transfer tokens from one address to another
    ///
    /// # Arguments
    /// * `from` - Sender address
    /// * `to` - Recipient address
    /// * `amount` - Amount to transfer
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<TransferEvent, TokenError> {
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }

        if from == to {
            return Err(TokenError::SelfTransfer);
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        *self.balances.entry(from.to_string()).or_insert(0) -= amount;
        *self.balances.entry(to.to_string()).or_insert(0) += amount;

        let event = TransferEvent {
            token: self.address.clone(),
            from: from.to_string(),
            to: to.to_string(),
            amount,
            timestamp: Utc::now(),
        };

        self.transfer_history.push(event.clone());
        if self.transfer_history.len() > MAX_HISTORY {
            self.transfer_history.remove(0);
        }

        log::debug!("{} transfer: {} -> {} ({})", self.symbol(), from, to, amount);

        Ok(event)
    }
}
