//! Webhook endpoint: GET serves a status page, POST feeds Telegram updates to the handler chain.

use crate::chain::HandlerChain;
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::Local;
use earnbot_core::{Update, UpdateKind};
use earnbot_storage::LedgerStore;
use std::sync::Arc;
use teloxide::utils::html::escape;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Header Telegram sets to the secret given to setWebhook.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared state of the webhook routes.
pub struct WebhookState {
    pub chain: HandlerChain,
    pub store: Arc<LedgerStore>,
    /// Expected secret token; POSTs are not checked when `None`.
    pub secret: Option<String>,
    pub display_name: String,
}

/// Router serving the webhook on `path`.
pub fn router(state: Arc<WebhookState>, path: &str) -> Router {
    Router::new()
        .route(path, get(status_handler).post(update_handler))
        .with_state(state)
}

/// Serves `app` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!(addr = %addr, "Webhook server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
            }
        })
        .await
        .context("Webhook server failed")
}

async fn status_handler(State(state): State<Arc<WebhookState>>) -> Html<String> {
    status_page(&state).await
}

async fn update_handler(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(expected) = state.secret.as_deref() {
        let given = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if given != Some(expected) {
            warn!("Rejected webhook request with a missing or wrong secret token");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            debug!(error = %e, "Body is not an update, serving status page");
            return status_page(&state).await.into_response();
        }
    };
    if matches!(update.kind(), UpdateKind::Other) {
        debug!(update_id = update.update_id, "Update has no message or callback, serving status page");
        return status_page(&state).await.into_response();
    }

    if let Err(e) = state.chain.handle(&update).await {
        error!(
            error = %e,
            update_id = update.update_id,
            chat_id = ?update.chat_id(),
            "Handler chain failed"
        );
    }
    StatusCode::OK.into_response()
}

async fn status_page(state: &WebhookState) -> Html<String> {
    let mut page = format!(
        "<h1>{} is running!</h1>\n\
         <p>This is a webhook endpoint for your Telegram bot.</p>\n\
         <p>Current time: {}</p>\n",
        escape(&state.display_name),
        Local::now().format("%Y-%m-%d %H:%M:%S"),
    );
    match state.store.load().await {
        Ok(ledger) => page.push_str(&format!(
            "<h2>Bot Statistics</h2>\n\
             <p>Total users: {}</p>\n\
             <p>Total points distributed: {}</p>\n\
             <p>Total points withdrawn: {}</p>\n",
            ledger.len(),
            ledger.total_balance(),
            ledger.total_withdrawn(),
        )),
        Err(e) => {
            warn!(error = %e, "Failed to load ledger for status page");
            page.push_str("<p>Statistics unavailable.</p>\n");
        }
    }
    Html(page)
}
