//! Storage crate: the points ledger and its JSON file store.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, Ledger, Leaderboard, RewardRules and operation outcomes
//! - [`json_store`] – LedgerStore (single JSON file, locked read-modify-write, atomic writes)

mod error;
mod json_store;
mod models;


pub use error::StorageError;
pub use json_store::{read_ledger_file, LedgerStore};
pub use models::{
    EarnOutcome, Leaderboard, LeaderboardEntry, Ledger, ReferralOutcome, RewardRules, UserRecord,
    WithdrawalMethod, WithdrawalOutcome, WithdrawalRequest, REF_CODE_LEN,
};
