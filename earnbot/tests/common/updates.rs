//! Telegram update payloads as the Bot API sends them.

use earnbot_core::Update;
use serde_json::{json, Value};

pub fn text_json(chat_id: i64, username: Option<&str>, text: &str) -> Value {
    json!({
        "update_id": 1000,
        "message": {
            "message_id": 1,
            "date": 1_700_000_000,
            "from": {"id": chat_id, "is_bot": false, "first_name": "Test", "username": username},
            "chat": {"id": chat_id, "type": "private", "first_name": "Test", "username": username},
            "text": text
        }
    })
}

pub fn callback_json(chat_id: i64, data: &str) -> Value {
    json!({
        "update_id": 1001,
        "callback_query": {
            "id": format!("cb-{}", chat_id),
            "from": {"id": chat_id, "is_bot": false, "first_name": "Test"},
            "chat_instance": "42",
            "message": {
                "message_id": 77,
                "date": 1_700_000_000,
                "chat": {"id": chat_id, "type": "private", "first_name": "Test"},
                "text": "menu"
            },
            "data": data
        }
    })
}

pub fn text(chat_id: i64, username: Option<&str>, text: &str) -> Update {
    serde_json::from_value(text_json(chat_id, username, text)).unwrap()
}

pub fn callback(chat_id: i64, data: &str) -> Update {
    serde_json::from_value(callback_json(chat_id, data)).unwrap()
}
