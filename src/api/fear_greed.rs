//! alternative.me Fear & Greed index client

use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::{get_json, ApiError};
use crate::models::SentimentReading;

const PROVIDER: &str = "Fear and Greed Index";

/// Roughly six months of daily readings
pub const HISTORY_DAYS: u32 = 180;

#[derive(Debug, Deserialize)]
pub struct FearGreedResponse {
    #[serde(default)]
    pub data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FearGreedEntry {
    pub value: String,
    pub value_classification: String,
    #[serde(default)]
    pub timestamp: String,
}

impl From<&FearGreedEntry> for SentimentReading {
    fn from(entry: &FearGreedEntry) -> Self {
        SentimentReading::from_raw(&entry.value, &entry.value_classification, &entry.timestamp)
    }
}

pub struct FearGreedClient {
    http_client: HttpClient,
    base_url: String,
}

impl FearGreedClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.alternative.me/fng/";

    pub fn with_base_url(http_client: HttpClient, base_url: String) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    /// GET `?limit=N`, newest reading first
    pub async fn readings(&self, limit: u32) -> Result<Vec<SentimentReading>, ApiError> {
        tracing::debug!("Fetching {} Fear and Greed reading(s)", limit);
        let request = self
            .http_client
            .get(&self.base_url)
            .query(&[("limit", limit)]);

        let response: FearGreedResponse = get_json(PROVIDER, request).await?;
        Ok(response.data.iter().map(SentimentReading::from).collect())
    }

    /// Today's reading
    pub async fn latest(&self) -> Result<SentimentReading, ApiError> {
        self.readings(1)
            .await?
            .into_iter()
            .next()
            .ok_or(ApiError::Decode {
                provider: PROVIDER,
                reason: "response contained no readings".to_string(),
            })
    }

    /// Daily readings for the last `days` days, oldest first
    pub async fn history(&self, days: u32) -> Result<Vec<SentimentReading>, ApiError> {
        let mut readings = self.readings(days).await?;
        if readings.is_empty() {
            return Err(ApiError::Decode {
                provider: PROVIDER,
                reason: "response contained no readings".to_string(),
            });
        }
        readings.reverse();
        Ok(readings)
    }
}
