//! Terminal handler: applies the update to the ledger and delivers the replies.

use crate::dispatch::Dispatcher;
use async_trait::async_trait;
use chrono::Utc;
use earnbot_core::{deliver_all, Bot, EarnbotError, Handler, HandlerResponse, Result, Update, UpdateKind};
use earnbot_storage::LedgerStore;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Runs the [`Dispatcher`] inside one ledger transaction, then sends its actions through `bot`.
#[derive(Clone)]
pub struct RewardHandler {
    store: Arc<LedgerStore>,
    bot: Arc<dyn Bot>,
    dispatcher: Dispatcher,
}

impl RewardHandler {
    pub fn new(store: Arc<LedgerStore>, bot: Arc<dyn Bot>, dispatcher: Dispatcher) -> Self {
        Self {
            store,
            bot,
            dispatcher,
        }
    }
}

#[async_trait]
impl Handler for RewardHandler {
    #[instrument(skip(self, update), fields(update_id = update.update_id))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        if matches!(update.kind(), UpdateKind::Other) {
            return Ok(HandlerResponse::Ignore);
        }

        let now = Utc::now().timestamp();
        let dispatcher = &self.dispatcher;
        let actions = self
            .store
            .update(|ledger| {
                let mut rng = rand::thread_rng();
                dispatcher.dispatch(ledger, update, now, &mut rng)
            })
            .await
            .map_err(|e| {
                error!(error = %e, chat_id = ?update.chat_id(), "Failed to apply update to ledger");
                EarnbotError::Storage(e.to_string())
            })?;

        let failures = deliver_all(self.bot.as_ref(), &actions).await;
        if failures > 0 {
            warn!(failures, total = actions.len(), "Some replies were not delivered");
        }
        info!(
            chat_id = ?update.chat_id(),
            actions = actions.len(),
            "step: RewardHandler handle done"
        );
        Ok(HandlerResponse::Stop)
    }
}
