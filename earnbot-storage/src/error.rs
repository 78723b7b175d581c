//! Storage error types.
//!
//! Used by the ledger store and by ledger operations.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Persist error: {0}")]
    Persist(String),
    #[error("Unknown user: {0}")]
    UnknownUser(i64),
}
