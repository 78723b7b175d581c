//! Chain handlers: update logging and the reward ledger.

mod logging_handler;
mod reward_handler;

pub use logging_handler::LoggingHandler;
pub use reward_handler::RewardHandler;
