//! Outbound actions produced while handling an update and delivered through a [`crate::Bot`].

use super::keyboard::InlineKeyboard;

/// One call to the messaging platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAction {
    /// Send a new message.
    SendMessage {
        chat_id: i64,
        text: String,
        keyboard: Option<InlineKeyboard>,
    },
    /// Replace the text (and keyboard) of a message the bot sent earlier.
    EditMessage {
        chat_id: i64,
        message_id: i64,
        text: String,
        keyboard: Option<InlineKeyboard>,
    },
    /// Acknowledge a button press, optionally with a toast or alert.
    AnswerCallback {
        callback_id: String,
        text: Option<String>,
        show_alert: bool,
    },
}

impl OutboundAction {
    /// Action name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            OutboundAction::SendMessage { .. } => "send_message",
            OutboundAction::EditMessage { .. } => "edit_message",
            OutboundAction::AnswerCallback { .. } => "answer_callback",
        }
    }

    /// Message text, or the callback answer text.
    pub fn text(&self) -> Option<&str> {
        match self {
            OutboundAction::SendMessage { text, .. } | OutboundAction::EditMessage { text, .. } => {
                Some(text)
            }
            OutboundAction::AnswerCallback { text, .. } => text.as_deref(),
        }
    }
}
