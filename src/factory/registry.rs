//! Wallet registry
//!
//! An arena of wallets indexed by creation order. Index `i` always
//! resolves to the `i`-th wallet this factory created.

use crate::crypto::derive_address;
use crate::multisig::{MultisigConfig, MultisigError, MultisigWallet};
use serde::{Deserialize, Serialize};

/// Namespace used by [`MultisigFactory::new`]
pub const DEFAULT_NAMESPACE: &str = "multisig-factory";

/// Stable reference to a factory-created wallet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WalletHandle {
    /// Position in the registry
    pub index: usize,
    /// Ledger address the wallet holds funds under
    pub address: String,
}

/// Creator and registry of multisig wallets
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigFactory {
    /// Seed for wallet address derivation
    namespace: String,
    /// Wallets in creation order
    wallets: Vec<MultisigWallet>,
}

impl Default for MultisigFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MultisigFactory {
    /// Create an empty factory in the default namespace
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    /// Create an empty factory whose wallet addresses derive from `namespace`
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            wallets: Vec::new(),
        }
    }

    /// Namespace wallet addresses are derived from
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Create a new wallet and register it at the next index
    pub fn create_wallet(
        &mut self,
        threshold: u32,
        approvers: Vec<String>,
    ) -> Result<WalletHandle, MultisigError> {
        let config = MultisigConfig::new(threshold, approvers)?;
        self.create_wallet_with_config(config)
    }

    /// Register a wallet built from an already validated config
    pub fn create_wallet_with_config(
        &mut self,
        config: MultisigConfig,
    ) -> Result<WalletHandle, MultisigError> {
        let index = self.wallets.len();
        let address = self.wallet_address(index);
        let wallet = MultisigWallet::new(address.clone(), config);

        log::info!(
            "Multisig wallet {} created at {} ({})",
            index,
            address,
            wallet.description()
        );

        self.wallets.push(wallet);
        Ok(WalletHandle { index, address })
    }

    /// Get a wallet by index
    pub fn get_wallet(&self, index: usize) -> Result<&MultisigWallet, MultisigError> {
        self.wallets
            .get(index)
            .ok_or(MultisigError::WalletNotFound(index))
    }

    /// Get a mutable reference to a wallet by index
    pub fn get_wallet_mut(&mut self, index: usize) -> Result<&mut MultisigWallet, MultisigError> {
        self.wallets
            .get_mut(index)
            .ok_or(MultisigError::WalletNotFound(index))
    }

    /// Get handle by wallet address
    pub fn find_by_address(&self, address: &str) -> Option<WalletHandle> {
        self.wallets
            .iter()
            .position(|w| w.address() == address)
            .map(|index| WalletHandle {
                index,
                address: address.to_string(),
            })
    }

    /// Number of wallets ever created
    pub fn instance_count(&self) -> usize {
        self.wallets.len()
    }

    /// Iterate over wallets in creation order
    pub fn wallets(&self) -> impl Iterator<Item = (WalletHandle, &MultisigWallet)> {
        self.wallets.iter().enumerate().map(|(index, wallet)| {
            (
                WalletHandle {
                    index,
                    address: wallet.address.clone(),
                },
                wallet,
            )
        })
    }

    /// Deterministic address for the wallet at `index`
    fn wallet_address(&self, index: usize) -> String {
        derive_address(&format!("{}:multisig:{}", self.namespace, index))
    }
}
