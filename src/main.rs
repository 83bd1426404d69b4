use std::sync::Arc;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use api::{CoinMarketCapClient, FearGreedClient};
use commands::Dispatcher;
use config::BotConfig;
use services::chart_backend::build_renderer;
use services::market_service::LiveMarketData;

struct Handler {
    dispatcher: Arc<Dispatcher>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&self.dispatcher, &ctx, &msg).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        info!("Bot is now running. Press CTRL+C to exit.");
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn build_dispatcher(config: &BotConfig) -> Dispatcher {
    let http_client = reqwest::Client::new();

    let fear_greed = Arc::new(FearGreedClient::with_base_url(
        http_client.clone(),
        config.endpoints.fear_greed.clone(),
    ));
    let coinmarketcap = CoinMarketCapClient::with_base_url(
        http_client.clone(),
        config.coinmarketcap_api_key.clone(),
        config.endpoints.coinmarketcap.clone(),
    );

    let market = Arc::new(LiveMarketData::new(fear_greed.clone(), coinmarketcap));
    let charts = build_renderer(&config.chart, http_client, fear_greed, &config.endpoints.coingecko);

    Dispatcher::new(market, charts, config.listing_limit)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coinpulse=debug,serenity=warn")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🤖 Starting coinpulse...");

    if let Err(e) = dotenv::dotenv() {
        error!("Error loading .env file: {}", e);
        return;
    }

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!(
        "Chart mode: {:?}, writing charts to {}",
        config.chart.mode,
        config.chart.output_dir.display()
    );

    let handler = Handler {
        dispatcher: Arc::new(build_dispatcher(&config)),
    };

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Error creating Discord client: {}", e);
            return;
        }
    };

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Shutdown signal received, closing Discord connection...");
        shard_manager.shutdown_all().await;
    });

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }

    info!("👋 coinpulse stopped");
}
