//! Wraps teloxide::Bot and implements [`earnbot_core::Bot`]. Production code talks to Telegram; tests can substitute another Bot impl.

use crate::config::BotConfig;
use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use earnbot_core::{parse_message_id, Bot as CoreBot, EarnbotError, InlineKeyboard, Result};
use teloxide::payloads::{AnswerCallbackQuerySetters, EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode,
};
use teloxide::{ApiError, RequestError};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Converts a keyboard into teloxide's callback-button markup.
pub fn to_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.text.clone(), b.callback_data.clone()))
            .collect::<Vec<_>>()
    }))
}

/// Builds a teloxide Bot from config, honoring TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BotConfig) -> AnyResult<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("Invalid Telegram API URL: {}", url))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

fn bot_error(e: RequestError) -> EarnbotError {
    EarnbotError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(chat_id), text.to_string())
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request = self
            .bot
            .edit_message_text(ChatId(chat_id), MessageId(id), text.to_string())
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }
        match request.await {
            Ok(_) => Ok(()),
            Err(RequestError::Api(ApiError::MessageNotModified)) => {
                debug!(chat_id, message_id, "Message not modified");
                Ok(())
            }
            Err(e) => Err(bot_error(e)),
        }
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_owned()));
        if let Some(text) = text {
            request = request.text(text.to_string()).show_alert(show_alert);
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnbot_core::InlineButton;

    #[test]
    fn test_to_markup_keeps_rows_and_callback_data() {
        let keyboard = InlineKeyboard::new()
            .row([InlineButton::new("A", "a"), InlineButton::new("B", "b")])
            .row([InlineButton::new("C", "c")]);
        let markup = to_markup(&keyboard);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[1][0].text, "C");
    }
}
