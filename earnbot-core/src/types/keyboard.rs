//! Inline keyboard model: rows of (label, callback data) buttons.

use serde::{Deserialize, Serialize};

/// One inline button; pressing it delivers `callback_data` back to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Inline keyboard attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of buttons.
    pub fn row(mut self, buttons: impl IntoIterator<Item = InlineButton>) -> Self {
        self.rows.push(buttons.into_iter().collect());
        self
    }

    /// All callback data values, row by row.
    pub fn callback_data(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .map(|b| b.callback_data.as_str())
            .collect()
    }
}
