//! Multisig Factory CLI Application
//!
//! A command-line interface for creating and operating multisig wallets.

use clap::{Parser, Subcommand};
use multisig_factory::cli::{self, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multisig")]
#[command(version = "0.1.0")]
#[command(about = "Multi-approver wallets and the factory that creates them", long_about = None)]
struct Cli {
    /// Data directory for factory state
    #[arg(short, long, default_value = ".multisig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the token wallets hold their funds in
    Init {
        /// Address credited with the full supply
        #[arg(long)]
        holder: String,

        /// Token name
        #[arg(long, default_value = "IDris Token")]
        name: String,

        /// Token symbol
        #[arg(long, default_value = "IDT")]
        symbol: String,

        /// Total supply in base units
        #[arg(long, default_value = "1000000")]
        supply: u128,
    },

    /// Create a new multisig wallet
    Create {
        /// Approvals required to execute
        #[arg(short, long)]
        threshold: u32,

        /// Approver addresses (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        approvers: Vec<String>,

        /// Refuse a competing threshold proposal instead of replacing the pending one
        #[arg(long)]
        reject_supersede: bool,
    },

    /// Move tokens from a holder into a wallet
    Fund {
        /// Holder paying in
        #[arg(short, long)]
        from: String,

        /// Wallet index
        #[arg(short, long)]
        wallet: usize,

        /// Amount to move
        #[arg(short, long)]
        amount: u128,
    },

    /// Propose a transfer out of a wallet
    Propose {
        /// Wallet index
        #[arg(short, long)]
        wallet: usize,

        /// Approver making the proposal
        #[arg(short, long)]
        caller: String,

        /// Amount to transfer
        #[arg(short, long)]
        amount: u128,

        /// Recipient address
        #[arg(short, long)]
        to: String,
    },

    /// Approve a pending transfer
    Approve {
        /// Wallet index
        #[arg(short, long)]
        wallet: usize,

        /// Approver casting the vote
        #[arg(short, long)]
        caller: String,

        /// Transaction id
        #[arg(long)]
        tx: u64,
    },

    /// Retry a transfer that already has enough approvals
    Execute {
        /// Wallet index
        #[arg(short, long)]
        wallet: usize,

        /// Approver requesting execution
        #[arg(short, long)]
        caller: String,

        /// Transaction id
        #[arg(long)]
        tx: u64,
    },

    /// Propose or vote for a new threshold
    SetThreshold {
        /// Wallet index
        #[arg(short, long)]
        wallet: usize,

        /// Approver casting the vote
        #[arg(short, long)]
        caller: String,

        /// Requested threshold
        #[arg(short, long)]
        threshold: u32,
    },

    /// Show a wallet and its transactions
    Show {
        /// Wallet index
        #[arg(short, long)]
        wallet: usize,
    },

    /// List all wallets
    List,

    /// Show a token balance
    Balance {
        /// Address to look up
        #[arg(short, long)]
        address: String,
    },

    /// Run an in-memory walkthrough with two wallets
    Demo,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Demo doesn't need persisted state
    if let Commands::Demo = cli.command {
        return cli::cmd_demo();
    }

    let mut state = AppState::new(&cli.data_dir)?;

    match cli.command {
        Commands::Demo => unreachable!(),

        Commands::Init {
            holder,
            name,
            symbol,
            supply,
        } => {
            cli::cmd_init(&mut state, &name, &symbol, supply, &holder)?;
        }

        Commands::Create {
            threshold,
            approvers,
            reject_supersede,
        } => {
            cli::cmd_create(&mut state, threshold, approvers, reject_supersede)?;
        }

        Commands::Fund {
            from,
            wallet,
            amount,
        } => {
            cli::cmd_fund(&mut state, &from, wallet, amount)?;
        }

        Commands::Propose {
            wallet,
            caller,
            amount,
            to,
        } => {
            cli::cmd_propose(&mut state, wallet, &caller, amount, &to)?;
        }

        Commands::Approve { wallet, caller, tx } => {
            cli::cmd_approve(&mut state, wallet, &caller, tx)?;
        }

        Commands::Execute { wallet, caller, tx } => {
            cli::cmd_execute(&mut state, wallet, &caller, tx)?;
        }

        Commands::SetThreshold {
            wallet,
            caller,
            threshold,
        } => {
            cli::cmd_set_threshold(&mut state, wallet, &caller, threshold)?;
        }

        Commands::Show { wallet } => {
            cli::cmd_show(&state, wallet)?;
        }

        Commands::List => {
            cli::cmd_list(&state)?;
        }

        Commands::Balance { address } => {
            cli::cmd_balance(&state, &address)?;
        }
    }

    Ok(())
}
