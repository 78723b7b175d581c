//! # Earning bot
//!
//! Telegram bot that pays points for pressing Earn, referring friends and climbing a leaderboard,
//! with withdrawals once a threshold is reached. Updates arrive over a webhook; the ledger lives in
//! one JSON file.

pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, stats_file, Cli, Commands};
pub use chain::HandlerChain;
pub use commands::{delete_webhook, ledger_stats, set_webhook, LedgerStats};
pub use config::{BaseConfig, BotConfig};
pub use dispatch::{BotSettings, Dispatcher};
pub use handlers::{LoggingHandler, RewardHandler};
pub use runner::{build_handler_chain, resolve_bot_username, run_bot, FALLBACK_BOT_USERNAME};
pub use telegram::{build_teloxide_bot, router, serve, TelegramBotAdapter, WebhookState};
