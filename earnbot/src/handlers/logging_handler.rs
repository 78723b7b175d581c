//! Logs each update in before() and the chain result in after(); always continues.

use async_trait::async_trait;
use earnbot_core::{Handler, HandlerResponse, Result, Update, UpdateKind};
use tracing::{debug, info, instrument};

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        match update.kind() {
            UpdateKind::Message(message) => info!(
                update_id = update.update_id,
                chat_id = message.chat.id,
                username = %message.username().unwrap_or("unknown"),
                text = %message.trimmed_text(),
                "Received message"
            ),
            UpdateKind::Callback(callback) => info!(
                update_id = update.update_id,
                chat_id = ?update.chat_id(),
                username = %callback.username().unwrap_or("unknown"),
                data = %callback.data.as_deref().unwrap_or(""),
                "Received callback query"
            ),
            UpdateKind::Other => debug!(update_id = update.update_id, "Received unsupported update"),
        }
        Ok(true)
    }

    #[instrument(skip(self, update, response))]
    async fn after(&self, update: &Update, response: &HandlerResponse) -> Result<()> {
        debug!(
            update_id = update.update_id,
            kind = update.kind_label(),
            response = ?response,
            "Processed update"
        );
        Ok(())
    }
}
