//! Bot configuration: BaseConfig (Telegram + files + listener) + RewardRules.

mod base;
mod bot_config;
mod rules;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use rules::{load_rules, validate_rules};
