//! Storage module for factory state persistence

pub mod persistence;

pub use persistence::{Snapshot, Storage, StorageConfig, StorageError};
