//! One-shot administrative commands: webhook registration and ledger statistics.

use anyhow::{Context, Result};
use earnbot_storage::read_ledger_file;
use std::fmt;
use std::path::Path;
use teloxide::payloads::SetWebhookSetters;
use teloxide::prelude::Requester;
use tracing::info;

use crate::config::BotConfig;
use crate::telegram::build_teloxide_bot;

/// Registers `url` as the webhook, passing WEBHOOK_SECRET as the secret token when set.
pub async fn set_webhook(config: &BotConfig, url: &str) -> Result<()> {
    let url = reqwest::Url::parse(url).with_context(|| format!("Invalid webhook URL: {}", url))?;
    let bot = build_teloxide_bot(config)?;
    let mut request = bot.set_webhook(url.clone());
    if let Some(secret) = config.webhook_secret() {
        request = request.secret_token(secret.to_string());
    }
    request.await.context("setWebhook failed")?;
    info!(url = %url, secret = config.webhook_secret().is_some(), "Webhook registered");
    Ok(())
}

/// Clears the webhook.
pub async fn delete_webhook(config: &BotConfig) -> Result<()> {
    let bot = build_teloxide_bot(config)?;
    bot.delete_webhook().await.context("deleteWebhook failed")?;
    info!("Webhook deleted");
    Ok(())
}

/// Totals over the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    pub total_users: usize,
    pub total_points: i64,
    pub total_withdrawn: i64,
}

impl fmt::Display for LedgerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total users: {}", self.total_users)?;
        writeln!(f, "Total points distributed: {}", self.total_points)?;
        write!(f, "Total points withdrawn: {}", self.total_withdrawn)
    }
}

/// Reads the ledger at `path` and sums it up. Nothing is created when the file is missing.
pub async fn ledger_stats(path: &str) -> Result<LedgerStats> {
    let path_buf = Path::new(path).to_path_buf();
    let ledger = tokio::task::spawn_blocking(move || read_ledger_file(&path_buf))
        .await
        .context("Ledger reader task failed")?
        .with_context(|| format!("Failed to read {}", path))?;
    Ok(LedgerStats {
        total_users: ledger.len(),
        total_points: ledger.total_balance(),
        total_withdrawn: ledger.total_withdrawn(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ledger_stats_sums_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(
            &path,
            r#"{"1": {"balance": 30, "ref_code": "aaaa1111"},
                "2": {"balance": 12, "ref_code": "bbbb2222", "withdrawn_total": 1000}}"#,
        )
        .unwrap();

        let stats = ledger_stats(path.to_str().unwrap()).await.unwrap();

        assert_eq!(
            stats,
            LedgerStats {
                total_users: 2,
                total_points: 42,
                total_withdrawn: 1000,
            }
        );
        assert!(stats.to_string().contains("Total users: 2"));
    }

    #[tokio::test]
    async fn test_ledger_stats_on_missing_file_is_empty_and_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("users.json");

        let stats = ledger_stats(path.to_str().unwrap()).await.unwrap();

        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.total_points, 0);
        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());
    }

    #[tokio::test]
    async fn test_ledger_stats_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{oops").unwrap();

        assert!(ledger_stats(path.to_str().unwrap()).await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{oops");
    }
}
