//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "earnbot")]
#[command(about = "Telegram earning bot: points ledger behind a webhook", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the webhook (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Overrides LISTEN_ADDR.
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Register the webhook URL with Telegram (sends WEBHOOK_SECRET when set).
    SetWebhook {
        #[arg(short, long)]
        url: String,
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Remove the webhook registration.
    DeleteWebhook {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print user and point totals from the ledger file.
    Stats {
        /// Ledger file; defaults to USERS_FILE or ./users.json.
        #[arg(short, long)]
        file: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Ledger path for `stats`: the explicit file, else USERS_FILE, else `./users.json`.
pub fn stats_file(file: Option<String>) -> String {
    file.or_else(|| std::env::var("USERS_FILE").ok().filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| "./users.json".to_string())
}
