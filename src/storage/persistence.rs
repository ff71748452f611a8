//! State persistence layer
//!
//! Saves and loads the factory registry together with the token ledger
//! its wallets draw on.

use crate::factory::MultisigFactory;
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Everything persisted between runs
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub factory: MultisigFactory,
    pub token: Option<Token>,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub state_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".multisig_data"),
            state_file: "state.json".to_string(),
        }
    }
}

/// Snapshot storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Get the state file path
    pub fn state_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.state_file)
    }

    /// Save a snapshot to disk
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let path = self.state_path();

        // Write to temporary file first
        let temp_path = self
            .config
            .data_dir
            .join(format!("{}.tmp", self.config.state_file));
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, snapshot)?;

        fs::rename(&temp_path, &path)?;
        log::debug!("State saved to {:?}", path);

        Ok(())
    }

    /// Load the snapshot from disk
    pub fn load(&self) -> Result<Snapshot, StorageError> {
        let path = self.state_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(format!(
                "State file not found: {:?}",
                path
            )));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);
        let snapshot: Snapshot = serde_json::from_reader(reader)?;

        log::debug!(
            "State loaded from {:?} ({} wallets)",
            path,
            snapshot.factory.instance_count()
        );

        Ok(snapshot)
    }

    /// Load the snapshot, or an empty one if none was saved yet
    pub fn load_or_default(&self) -> Result<Snapshot, StorageError> {
        if self.exists() {
            self.load()
        } else {
            Ok(Snapshot::default())
        }
    }

    /// Check if a saved snapshot exists
    pub fn exists(&self) -> bool {
        self.state_path().exists()
    }

    /// Delete the saved snapshot
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.state_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
