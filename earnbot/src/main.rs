//! Binary for the earning bot.

use anyhow::Result;
use clap::Parser;
use earnbot::{
    delete_webhook, ledger_stats, load_config, run_bot, set_webhook, stats_file, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, listen } => {
            let mut config = load_config(token)?;
            if let Some(listen) = listen {
                config.base.listen_addr = listen;
            }
            run_bot(config).await
        }
        Commands::SetWebhook { url, token } => {
            let config = load_config(token)?;
            config.validate()?;
            set_webhook(&config, &url).await?;
            println!("Webhook set to {}", url);
            Ok(())
        }
        Commands::DeleteWebhook { token } => {
            let config = load_config(token)?;
            config.validate()?;
            delete_webhook(&config).await?;
            println!("Webhook deleted");
            Ok(())
        }
        Commands::Stats { file } => {
            let stats = ledger_stats(&stats_file(file)).await?;
            println!("{}", stats);
            Ok(())
        }
    }
}
