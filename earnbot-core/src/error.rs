//! Error types for the bot core.

use thiserror::Error;

/// Top-level error for earnbot handlers and bot transport.
#[derive(Error, Debug)]
pub enum EarnbotError {
    /// Ledger could not be read, updated or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The messaging platform rejected or failed a call.
    #[error("Bot error: {0}")]
    Bot(String),
}

/// Result type for core operations; uses [`EarnbotError`].
pub type Result<T> = std::result::Result<T, EarnbotError>;
