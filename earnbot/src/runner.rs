//! Startup: logging, ledger store, Telegram adapter, handler chain, webhook server.

use anyhow::{Context, Result};
use earnbot_core::{init_tracing, Bot};
use earnbot_storage::LedgerStore;
use std::sync::Arc;
use teloxide::prelude::Requester;
use tracing::{info, instrument, warn};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::dispatch::{BotSettings, Dispatcher};
use crate::handlers::{LoggingHandler, RewardHandler};
use crate::telegram::{build_teloxide_bot, router, serve, TelegramBotAdapter, WebhookState};

/// Username used in share links when neither BOT_USERNAME nor getMe provides one.
pub const FALLBACK_BOT_USERNAME: &str = "YourBotName";

/// Production chain: LoggingHandler → RewardHandler.
pub fn build_handler_chain(
    store: Arc<LedgerStore>,
    bot: Arc<dyn Bot>,
    settings: BotSettings,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(RewardHandler::new(
            store,
            bot,
            Dispatcher::new(settings),
        )))
}

/// Configured BOT_USERNAME, else the username from getMe, else [`FALLBACK_BOT_USERNAME`].
pub async fn resolve_bot_username(config: &BotConfig, bot: &teloxide::Bot) -> String {
    if let Some(name) = config.base().bot_username.as_deref() {
        return name.to_string();
    }
    match bot.get_me().await {
        Ok(me) => match me.user.username {
            Some(name) => {
                info!(bot_username = %name, "Resolved bot username via getMe");
                name
            }
            None => {
                warn!("getMe returned no username, using fallback");
                FALLBACK_BOT_USERNAME.to_string()
            }
        },
        Err(e) => {
            warn!(error = %e, "getMe failed, using fallback bot username");
            FALLBACK_BOT_USERNAME.to_string()
        }
    }
}

/// Main entry: validate config, init logging, open the ledger, then serve the webhook.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let store = Arc::new(
        LedgerStore::open(config.users_file())
            .with_context(|| format!("Failed to open ledger file {}", config.users_file()))?,
    );
    info!(
        users_file = %config.users_file(),
        listen_addr = %config.listen_addr(),
        webhook_path = %config.webhook_path(),
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config)?;
    let bot_username = resolve_bot_username(&config, &teloxide_bot).await;
    let settings = BotSettings::new(
        config.rules().clone(),
        bot_username,
        config.base().bot_display_name.clone(),
    );
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot));
    let chain = build_handler_chain(store.clone(), bot, settings);

    let state = Arc::new(WebhookState {
        chain,
        store,
        secret: config.webhook_secret().map(str::to_string),
        display_name: config.base().bot_display_name.clone(),
    });
    let app = router(state, config.webhook_path());
    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;

    info!("Bot started successfully");
    serve(listener, app).await
}
