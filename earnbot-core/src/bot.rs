//! Bot abstraction for sending, editing and answering.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in the `earnbot` crate.
//! [`deliver_all`] runs a list of [`OutboundAction`]s best-effort.

use crate::error::{EarnbotError, Result};
use crate::types::{InlineKeyboard, OutboundAction};
use async_trait::async_trait;
use tracing::{debug, error};

/// Abstraction over the messaging platform's send / edit / answer calls.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends an HTML-formatted message, optionally with an inline keyboard.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()>;

    /// Replaces the text and keyboard of a message the bot sent earlier.
    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()>;

    /// Acknowledges a callback query. `text` is shown as a toast, or as an alert when `show_alert`.
    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()>;
}

/// Converts a wire message id into the platform's 32-bit id.
pub fn parse_message_id(id: i64) -> Result<i32> {
    i32::try_from(id).map_err(|_| EarnbotError::Bot(format!("Invalid message_id for edit: {}", id)))
}

/// Runs `actions` in order against `bot`. Failures are logged and skipped; returns how many failed.
pub async fn deliver_all(bot: &dyn Bot, actions: &[OutboundAction]) -> usize {
    let mut failures = 0;
    for action in actions {
        let result = match action {
            OutboundAction::SendMessage {
                chat_id,
                text,
                keyboard,
            } => bot.send_message(*chat_id, text, keyboard.as_ref()).await,
            OutboundAction::EditMessage {
                chat_id,
                message_id,
                text,
                keyboard,
            } => {
                bot.edit_message(*chat_id, *message_id, text, keyboard.as_ref())
                    .await
            }
            OutboundAction::AnswerCallback {
                callback_id,
                text,
                show_alert,
            } => {
                bot.answer_callback(callback_id, text.as_deref(), *show_alert)
                    .await
            }
        };
        match result {
            Ok(()) => debug!(action = action.name(), "Outbound action delivered"),
            Err(e) => {
                failures += 1;
                error!(action = action.name(), error = %e, "Outbound action failed");
            }
        }
    }
    failures
}
