use tracing::{error, info};

use super::reply::{Reply, SendError};
use crate::services::market_service::{fetch_snapshot, MarketData, SnapshotError};
use crate::utils::format::build_market_overview;

/// User-facing text for the stage that failed
pub fn failure_message(err: &SnapshotError, limit: u32) -> String {
    match err {
        SnapshotError::Sentiment(_) => "Error fetching Fear and Greed Index.".to_string(),
        SnapshotError::Listings(_) => format!("Error fetching top {} cryptocurrencies.", limit),
        SnapshotError::GlobalMetrics(_) => "Error fetching global market metrics.".to_string(),
    }
}

pub async fn execute(market: &dyn MarketData, limit: u32, reply: &dyn Reply) -> Result<(), SendError> {
    let snapshot = match fetch_snapshot(market, limit).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("❌ Market overview failed: {}", e);
            return reply.text(&failure_message(&e, limit)).await;
        }
    };

    let message = build_market_overview(&snapshot.sentiment, &snapshot.quotes, &snapshot.metrics);
    reply.text(&message).await?;

    let labels: Vec<String> = snapshot.quotes.iter().map(|q| q.log_label()).collect();
    info!("✓ Market overview sent ({})", labels.join(", "));
    Ok(())
}
