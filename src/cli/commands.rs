//! CLI commands for the multisig factory
//!
//! Implements all command handlers for the CLI interface.

use crate::factory::MultisigFactory;
use crate::multisig::{
    ApprovalStatus, MultisigConfig, MultisigWallet, SupersedePolicy, ThresholdStatus,
};
use crate::storage::{Snapshot, Storage, StorageConfig};
use crate::token::Token;
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub factory: MultisigFactory,
    pub token: Option<Token>,
    pub storage: Storage,
}

impl AppState {
    /// Load state from `data_dir`, starting empty if nothing was saved
    pub fn new(data_dir: &Path) -> CliResult<Self> {
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        })?;

        let snapshot = storage.load_or_default()?;

        Ok(Self {
            factory: snapshot.factory,
            token: snapshot.token,
            storage,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        let snapshot = Snapshot {
            factory: self.factory.clone(),
            token: self.token.clone(),
        };
        self.storage.save(&snapshot)?;
        Ok(())
    }
}

fn require_token(token: &mut Option<Token>) -> CliResult<&mut Token> {
    token
        .as_mut()
        .ok_or_else(|| "No token deployed. Run: multisig init --holder <address>".into())
}

/// Deploy the token the wallets hold
pub fn cmd_init(
    state: &mut AppState,
    name: &str,
    symbol: &str,
    supply: u128,
    holder: &str,
) -> CliResult<()> {
    if let Some(token) = &state.token {
        println!("⚠️  Token {} already deployed at {}", token.symbol(), token.address);
        return Ok(());
    }

    let token = Token::deploy(name, symbol, 18, supply, holder)?;

    println!("✅ Token deployed!");
    println!("   📍 Address: {}", token.address);
    println!("   🪙 {} ({})", token.name(), token.symbol());
    println!("   💰 Supply: {} held by {}", token.total_supply(), holder);

    state.token = Some(token);
    state.save()
}

/// Create a new multisig wallet through the factory
///
/// With `reject_supersede`, a threshold proposal for a different value is
/// refused while another one is outstanding.
pub fn cmd_create(
    state: &mut AppState,
    threshold: u32,
    approvers: Vec<String>,
    reject_supersede: bool,
) -> CliResult<()> {
    let policy = if reject_supersede {
        SupersedePolicy::Reject
    } else {
        SupersedePolicy::Replace
    };
    let config = MultisigConfig::new(threshold, approvers)?.with_supersede_policy(policy);
    let handle = state.factory.create_wallet_with_config(config)?;
    let wallet = state.factory.get_wallet(handle.index)?;

    println!("🔐 Multisig wallet created!");
    println!("   #️⃣  Index: {}", handle.index);
    println!("   📍 Address: {}", handle.address);
    println!("   🛡️  Policy: {}", wallet.description());
    println!("   🗳️  Competing threshold proposals: {:?}", policy);

    state.save()
}

/// Move tokens from a holder into a wallet
pub fn cmd_fund(state: &mut AppState, from: &str, wallet: usize, amount: u128) -> CliResult<()> {
    let address = state.factory.get_wallet(wallet)?.address.clone();
    let token = require_token(&mut state.token)?;

    token.transfer(from, &address, amount)?;

    println!("💸 Funded wallet {} with {} {}", wallet, amount, token.symbol());
    println!("   New balance: {}", token.balance_of(&address));

    state.save()
}

/// Propose a transfer out of a wallet
pub fn cmd_propose(
    state: &mut AppState,
    wallet: usize,
    caller: &str,
    amount: u128,
    to: &str,
) -> CliResult<()> {
    let token = require_token(&mut state.token)?;
    let multisig = state.factory.get_wallet_mut(wallet)?;

    let id = multisig.propose_transfer(token, caller, amount, to)?;
    let tx = multisig.transaction(id)?;

    println!("📝 Transaction {} proposed by {}", id, caller);
    println!("   ├─ Amount: {}", amount);
    println!("   ├─ Recipient: {}", to);
    if tx.executed {
        println!("   └─ Executed immediately");
    } else {
        println!(
            "   └─ Approvals: {}/{}",
            tx.approval_count(),
            multisig.threshold()
        );
    }

    state.save()
}

/// Approve a pending transfer
pub fn cmd_approve(state: &mut AppState, wallet: usize, caller: &str, tx: u64) -> CliResult<()> {
    let token = require_token(&mut state.token)?;
    let multisig = state.factory.get_wallet_mut(wallet)?;

    let result = multisig.approve_transfer(token, caller, tx);

    // A vote that reached quorum is kept even if the transfer failed
    state.save()?;

    match result? {
        ApprovalStatus::Pending {
            approvals,
            required,
        } => {
            println!("✍️  {} approved transaction {}", caller, tx);
            println!("   Approvals: {}/{}", approvals, required);
        }
        ApprovalStatus::Executed => {
            println!("✅ Transaction {} executed", tx);
        }
    }

    Ok(())
}

/// Retry execution of a transfer that already has quorum
pub fn cmd_execute(state: &mut AppState, wallet: usize, caller: &str, tx: u64) -> CliResult<()> {
    let token = require_token(&mut state.token)?;
    let multisig = state.factory.get_wallet_mut(wallet)?;

    multisig.execute_transfer(token, caller, tx)?;
    println!("✅ Transaction {} executed", tx);

    state.save()
}

/// Propose or vote for a new threshold
pub fn cmd_set_threshold(
    state: &mut AppState,
    wallet: usize,
    caller: &str,
    threshold: u32,
) -> CliResult<()> {
    let multisig = state.factory.get_wallet_mut(wallet)?;

    match multisig.propose_threshold(caller, threshold)? {
        ThresholdStatus::Pending {
            proposed,
            approvals,
            required,
        } => {
            println!("🗳️  {} backs threshold {}", caller, proposed);
            println!("   Votes: {}/{}", approvals, required);
        }
        ThresholdStatus::Applied { previous, current } => {
            println!("✅ Threshold changed from {} to {}", previous, current);
            for tx in multisig.ready_transactions() {
                println!(
                    "   ⏳ Transaction {} has {} approvals; run: multisig execute --tx {}",
                    tx.id,
                    tx.approval_count(),
                    tx.id
                );
            }
        }
    }

    state.save()
}

/// Show details of a single wallet
pub fn cmd_show(state: &AppState, wallet: usize) -> CliResult<()> {
    let multisig = state.factory.get_wallet(wallet)?;
    print_wallet(wallet, multisig, state.token.as_ref());
    Ok(())
}

/// List all wallets created by the factory
pub fn cmd_list(state: &AppState) -> CliResult<()> {
    if state.factory.instance_count() == 0 {
        println!("📭 No wallets found. Create one with: multisig create");
        return Ok(());
    }

    println!("📋 Wallets:");
    for (handle, wallet) in state.factory.wallets() {
        let balance = state
            .token
            .as_ref()
            .map(|t| t.balance_of(&handle.address))
            .unwrap_or(0);
        println!(
            "   [{}] {} ({}) - {} tokens, {} transactions",
            handle.index,
            handle.address,
            wallet.description(),
            balance,
            wallet.transaction_count()
        );
    }

    Ok(())
}

/// Show a token balance
pub fn cmd_balance(state: &AppState, address: &str) -> CliResult<()> {
    let token = state
        .token
        .as_ref()
        .ok_or("No token deployed. Run: multisig init --holder <address>")?;

    println!("💰 Balance for {}", address);
    println!("   {} {}", token.balance_of(address), token.symbol());

    Ok(())
}

/// Walk through two factory wallets end to end without touching disk
pub fn cmd_demo() -> CliResult<()> {
    let signers: Vec<String> = ["signer1", "signer2", "signer3", "signer4"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let recipient = signers[3].clone();

    let mut token = Token::deploy("IDris Token", "IDT", 18, 1_000_000, &signers[0])?;
    let mut factory = MultisigFactory::new();

    let one = factory.create_wallet(3, signers.clone())?;
    let two = factory.create_wallet(3, signers.clone())?;
    token.transfer(&signers[0], &one.address, 50)?;
    token.transfer(&signers[0], &two.address, 50)?;

    let rounds = [
        (&one, [&signers[2], &signers[3]]),
        (&two, [&signers[1], &signers[2]]),
    ];
    for (handle, approvers) in rounds {
        let wallet = factory.get_wallet_mut(handle.index)?;
        let id = wallet.propose_transfer(&mut token, &signers[0], 10, &recipient)?;

        println!(
            "Wallet {}: transaction {} executed before approval: {}",
            handle.index,
            id,
            wallet.transaction(id)?.executed
        );

        for approver in approvers {
            wallet.approve_transfer(&mut token, approver, id)?;
        }

        println!(
            "Wallet {}: transaction {} executed after approval: {}",
            handle.index,
            id,
            wallet.transaction(id)?.executed
        );
    }

    println!();
    for (handle, wallet) in factory.wallets() {
        print_wallet(handle.index, wallet, Some(&token));
    }
    println!("Recipient balance: {}", token.balance_of(&recipient));

    Ok(())
}

fn print_wallet(index: usize, wallet: &MultisigWallet, token: Option<&Token>) {
    println!("🔐 Wallet {}", index);
    println!("   ├─ Address: {}", wallet.address());
    println!("   ├─ Policy: {}", wallet.description());
    println!("   ├─ Approvers: {}", wallet.approvers().join(", "));
    if let Some(token) = token {
        println!(
            "   ├─ Balance: {} {}",
            token.balance_of(wallet.address()),
            token.symbol()
        );
    }
    if let Some(proposal) = wallet.threshold_proposal() {
        println!(
            "   ├─ Threshold proposal: {} ({}/{} votes)",
            proposal.proposed,
            proposal.approval_count(),
            wallet.threshold()
        );
    }
    println!("   └─ Transactions: {}", wallet.transaction_count());

    for tx in wallet.transactions() {
        let status = if tx.executed {
            "executed"
        } else if tx.approval_count() >= wallet.threshold() as usize {
            "ready"
        } else {
            "pending"
        };
        println!(
            "      #{} {} -> {} [{}] approvals {}/{} by {}",
            tx.id,
            tx.amount,
            tx.recipient,
            status,
            tx.approval_count(),
            wallet.threshold(),
            tx.approved_by().collect::<Vec<_>>().join(", ")
        );
    }
}
