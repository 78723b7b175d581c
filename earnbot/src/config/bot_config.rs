//! BotConfig: BaseConfig + RewardRules. Use load() for env-based loading.

use anyhow::Result;
use earnbot_storage::RewardRules;

use super::rules::{load_rules, validate_rules};
use super::BaseConfig;

/// Bot config: BaseConfig + reward rules.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub rules: RewardRules,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let rules = load_rules()?;
        Ok(Self { base, rules })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        validate_rules(&self.rules)
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn rules(&self) -> &RewardRules {
        &self.rules
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn users_file(&self) -> &str {
        &self.base.users_file
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn listen_addr(&self) -> &str {
        &self.base.listen_addr
    }
    pub fn webhook_path(&self) -> &str {
        &self.base.webhook_path
    }
    pub fn webhook_secret(&self) -> Option<&str> {
        self.base.webhook_secret.as_deref()
    }
}
