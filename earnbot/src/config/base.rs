//! Base config: Telegram connection, files, HTTP listener. Loaded from env.

use anyhow::{anyhow, Result};
use std::env;
use std::net::SocketAddr;

/// Base config: Telegram-related, storage, logging and webhook listener.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// BOT_USERNAME; resolved with getMe at startup when unset
    pub bot_username: Option<String>,
    /// Name shown in welcome texts
    pub bot_display_name: String,
    /// Ledger JSON file
    pub users_file: String,
    /// Diagnostic log file (warnings and errors)
    pub log_file: String,
    /// Webhook listener address
    pub listen_addr: String,
    /// HTTP path Telegram posts updates to
    pub webhook_path: String,
    /// Expected X-Telegram-Bot-Api-Secret-Token; unchecked when unset
    pub webhook_secret: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => non_empty_var("BOT_TOKEN").ok_or_else(|| anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url =
            non_empty_var("TELEGRAM_API_URL").or_else(|| non_empty_var("TELOXIDE_API_URL"));
        let bot_username = non_empty_var("BOT_USERNAME")
            .map(|s| s.trim_start_matches('@').to_string());
        let bot_display_name =
            non_empty_var("BOT_DISPLAY_NAME").unwrap_or_else(|| "Earning Bot".to_string());
        let users_file =
            non_empty_var("USERS_FILE").unwrap_or_else(|| "./users.json".to_string());
        let log_file =
            non_empty_var("LOG_FILE").unwrap_or_else(|| "logs/earnbot.log".to_string());
        let listen_addr =
            non_empty_var("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let webhook_path =
            non_empty_var("WEBHOOK_PATH").unwrap_or_else(|| "/webhook".to_string());
        let webhook_secret = non_empty_var("WEBHOOK_SECRET");

        Ok(Self {
            bot_token,
            telegram_api_url,
            bot_username,
            bot_display_name,
            users_file,
            log_file,
            listen_addr,
            webhook_path,
            webhook_secret,
        })
    }

    /// Validate config: API URL and listen address must parse, webhook path must be absolute.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("LISTEN_ADDR is not a valid socket address: {}", self.listen_addr);
        }
        if !self.webhook_path.starts_with('/') {
            anyhow::bail!("WEBHOOK_PATH must start with '/': {}", self.webhook_path);
        }
        Ok(())
    }
}
