//! Telegram layer: teloxide-backed [`earnbot_core::Bot`] and the webhook HTTP endpoint.

mod bot_adapter;
mod webhook;

pub use bot_adapter::{build_teloxide_bot, to_markup, TelegramBotAdapter};
pub use webhook::{router, serve, WebhookState};
