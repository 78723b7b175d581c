//! Inbound update model: the subset of the Telegram `Update` object the bot reads.
//!
//! Unknown fields are ignored, so full Telegram payloads deserialize as-is.

use serde::{Deserialize, Serialize};

/// Chat the update came from. For private chats `id` equals the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "type", default)]
    pub chat_type: Option<String>,
}

/// The user who sent a message or pressed a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// A text (or other) message sent to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub text: Option<String>,
}

impl IncomingMessage {
    /// Trimmed message text; empty when the message carries no text.
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or("")
    }

    /// Username from the chat, falling back to the sender.
    pub fn username(&self) -> Option<&str> {
        self.chat
            .username
            .as_deref()
            .or_else(|| self.from.as_ref().and_then(|f| f.username.as_deref()))
    }
}

/// The bot message an inline keyboard was attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackMessage {
    pub message_id: i64,
    pub chat: Chat,
}

/// An inline keyboard button press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: Sender,
    #[serde(default)]
    pub message: Option<CallbackMessage>,
    #[serde(default)]
    pub data: Option<String>,
}

impl CallbackQuery {
    /// Username from the message chat, falling back to the presser.
    pub fn username(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.chat.username.as_deref())
            .or(self.from.username.as_deref())
    }
}

/// Webhook payload. At most one of `message` / `callback_query` is normally set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// What an [`Update`] carries, as far as the bot is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind<'a> {
    Message(&'a IncomingMessage),
    Callback(&'a CallbackQuery),
    Other,
}

impl Update {
    /// Classifies the update; a message wins over a callback query.
    pub fn kind(&self) -> UpdateKind<'_> {
        match (&self.message, &self.callback_query) {
            (Some(m), _) => UpdateKind::Message(m),
            (None, Some(c)) => UpdateKind::Callback(c),
            (None, None) => UpdateKind::Other,
        }
    }

    /// Chat id the update belongs to, if any.
    pub fn chat_id(&self) -> Option<i64> {
        match self.kind() {
            UpdateKind::Message(m) => Some(m.chat.id),
            UpdateKind::Callback(c) => Some(
                c.message
                    .as_ref()
                    .map(|m| m.chat.id)
                    .unwrap_or(c.from.id),
            ),
            UpdateKind::Other => None,
        }
    }

    /// Short label for logs.
    pub fn kind_label(&self) -> &'static str {
        match self.kind() {
            UpdateKind::Message(_) => "message",
            UpdateKind::Callback(_) => "callback_query",
            UpdateKind::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_update_ignores_unknown_fields() {
        let json = r#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "username": "alice", "first_name": "Alice"},
                "from": {"id": 42, "is_bot": false, "first_name": "Alice", "username": "alice"},
                "text": "  /start abc12345 "
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.chat_id(), Some(42));
        assert_eq!(update.kind_label(), "message");
        match update.kind() {
            UpdateKind::Message(m) => {
                assert_eq!(m.trimmed_text(), "/start abc12345");
                assert_eq!(m.username(), Some("alice"));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_parse_callback_update() {
        let json = r#"{
            "update_id": 11,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 42, "is_bot": false, "first_name": "Alice"},
                "message": {"message_id": 77, "date": 1700000000, "chat": {"id": 42, "type": "private"}},
                "chat_instance": "x",
                "data": "earn"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.chat_id(), Some(42));
        match update.kind() {
            UpdateKind::Callback(c) => {
                assert_eq!(c.data.as_deref(), Some("earn"));
                assert_eq!(c.message.as_ref().unwrap().message_id, 77);
                assert_eq!(c.username(), None);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_empty_object_is_other() {
        let update: Update = serde_json::from_str("{}").unwrap();
        assert_eq!(update.kind(), UpdateKind::Other);
        assert_eq!(update.chat_id(), None);
    }

    #[test]
    fn test_message_without_text_has_empty_trimmed_text() {
        let json = r#"{"update_id": 1, "message": {"message_id": 1, "chat": {"id": 3}}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.message.unwrap().trimmed_text(), "");
    }
}
