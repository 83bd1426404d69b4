//! CoinGecko market chart client, used by the live chart backend

use chrono::DateTime;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::{get_json, ApiError};

const PROVIDER: &str = "CoinGecko";

#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    /// `[unix_millis, price]` pairs, oldest first
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
}

/// Daily closing prices, labelled by date
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

impl TryFrom<MarketChartResponse> for PriceHistory {
    type Error = ApiError;

    fn try_from(response: MarketChartResponse) -> Result<Self, Self::Error> {
        if response.prices.is_empty() {
            return Err(ApiError::Decode {
                provider: PROVIDER,
                reason: "market chart contained no prices".to_string(),
            });
        }

        let (dates, prices) = response
            .prices
            .into_iter()
            .map(|(millis, price)| {
                let date = DateTime::from_timestamp_millis(millis as i64)
                    .map(|dt| dt.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                (date, price)
            })
            .unzip();

        Ok(PriceHistory { dates, prices })
    }
}

pub struct CoinGeckoClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    pub fn with_base_url(http_client: HttpClient, base_url: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET /coins/{id}/market_chart?vs_currency=usd&days=N
    pub async fn market_chart(&self, coin_id: &str, days: u32) -> Result<PriceHistory, ApiError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        let days = days.to_string();
        let request = self
            .http_client
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", days.as_str())]);

        let response: MarketChartResponse = get_json(PROVIDER, request).await?;
        PriceHistory::try_from(response)
    }
}
