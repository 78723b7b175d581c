//! Mock implementation of [`earnbot_core::Bot`] for integration tests.
//!
//! Records every call as an [`OutboundAction`] so tests can assert on replies without hitting Telegram.

use async_trait::async_trait;
use earnbot_core::{Bot, EarnbotError, InlineKeyboard, OutboundAction, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<OutboundAction>>,
    /// When set, every send_message fails (after being recorded).
    fail_sends: AtomicBool,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_sends() -> Arc<Self> {
        let bot = Self::default();
        bot.fail_sends.store(true, Ordering::SeqCst);
        Arc::new(bot)
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<OutboundAction> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, action: OutboundAction) {
        self.calls.lock().unwrap().push(action);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        self.record(OutboundAction::SendMessage {
            chat_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(EarnbotError::Bot("send failed".to_string()));
        }
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        self.record(OutboundAction::EditMessage {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        self.record(OutboundAction::AnswerCallback {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
            show_alert,
        });
        Ok(())
    }
}
