//! # Handler chain
//!
//! Runs a sequence of handlers. Each handler has optional before/handle/after: all before run in
//! order (any false stops the chain); then handle runs until Stop; then all after run in reverse.

use earnbot_core::{Handler, HandlerResponse, Result, Update};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Chain of handlers: before (all) → handle (until Stop) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs all before → handle until Stop → all after in reverse.
    #[instrument(skip(self, update), fields(update_id = update.update_id))]
    pub async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            if !h.before(update).await? {
                debug!(handler = %name, "before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(update).await?;
            debug!(handler = %name, response = ?response, "Handler processed");
            match response {
                HandlerResponse::Stop => {
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(update, &final_response).await?;
        }

        Ok(final_response)
    }
}
