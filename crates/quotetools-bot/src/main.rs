use anyhow::Context as _;
use quotetools_discord::{DiscordConfig, QuoteHandler};
use serenity::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,quotetools=debug,quotetools_discord=debug".into()),
        )
        .init();

    tracing::info!("💬 Quote bot initializing...");

    let config = DiscordConfig::from_env().context("Failed to load configuration")?;

    if config.owner_ids.is_empty() {
        tracing::info!("No QUOTE_OWNER_IDS set - using the application owner");
    } else {
        tracing::info!("🔐 {} configured owner(s)", config.owner_ids.len());
    }

    let mut client = Client::builder(&config.token, QuoteHandler::intents())
        .event_handler(QuoteHandler::new(config.clone()))
        .await
        .context("Failed to build Discord client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await.context("Discord client stopped")?;

    Ok(())
}
