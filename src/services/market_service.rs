use std::sync::Arc;

use serenity::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiError, CoinMarketCapClient, FearGreedClient};
use crate::models::{AssetQuote, GlobalMetrics, SentimentReading};

/// The three upstream reads behind `!Market`
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn sentiment(&self) -> Result<SentimentReading, ApiError>;
    async fn top_listings(&self, limit: u32) -> Result<Vec<AssetQuote>, ApiError>;
    async fn global_metrics(&self) -> Result<GlobalMetrics, ApiError>;
}

/// Fear & Greed plus CoinMarketCap over HTTP
pub struct LiveMarketData {
    fear_greed: Arc<FearGreedClient>,
    coinmarketcap: CoinMarketCapClient,
}

impl LiveMarketData {
    pub fn new(fear_greed: Arc<FearGreedClient>, coinmarketcap: CoinMarketCapClient) -> Self {
        Self {
            fear_greed,
            coinmarketcap,
        }
    }
}

#[async_trait]
impl MarketData for LiveMarketData {
    async fn sentiment(&self) -> Result<SentimentReading, ApiError> {
        self.fear_greed.latest().await
    }

    async fn top_listings(&self, limit: u32) -> Result<Vec<AssetQuote>, ApiError> {
        self.coinmarketcap.top_listings(limit).await
    }

    async fn global_metrics(&self) -> Result<GlobalMetrics, ApiError> {
        self.coinmarketcap.global_metrics().await
    }
}

/// Everything `!Market` needs, fetched in one pass
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub sentiment: SentimentReading,
    pub quotes: Vec<AssetQuote>,
    pub metrics: GlobalMetrics,
}

/// Which fetch stopped the snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("sentiment fetch failed: {0}")]
    Sentiment(#[source] ApiError),
    #[error("top listings fetch failed: {0}")]
    Listings(#[source] ApiError),
    #[error("global metrics fetch failed: {0}")]
    GlobalMetrics(#[source] ApiError),
}

/// Fetch sentiment, then listings, then global metrics.
///
/// Stops at the first failure; later stages are never requested.
pub async fn fetch_snapshot(market: &dyn MarketData, limit: u32) -> Result<MarketSnapshot, SnapshotError> {
    info!("📊 Fetching market snapshot");

    let sentiment = market.sentiment().await.map_err(SnapshotError::Sentiment)?;
    debug!("Sentiment: {} ({})", sentiment.raw_value, sentiment.label);

    let quotes = market
        .top_listings(limit)
        .await
        .map_err(SnapshotError::Listings)?;
    debug!("Fetched {} listings", quotes.len());

    let metrics = market
        .global_metrics()
        .await
        .map_err(SnapshotError::GlobalMetrics)?;
    debug!("BTC dominance: {:.2}%", metrics.btc_dominance);

    Ok(MarketSnapshot {
        sentiment,
        quotes,
        metrics,
    })
}
