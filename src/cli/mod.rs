//! Command-line interface for the multisig factory

pub mod commands;

pub use commands::*;
