use serde::Deserialize;

use crate::models::{AssetQuote, GlobalMetrics};

/// `status` block carried by every CoinMarketCap response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Response from `/v1/global-metrics/quotes/latest`
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalMetricsResponse {
    #[serde(default)]
    pub status: Status,
    pub data: GlobalMetricsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalMetricsData {
    pub btc_dominance: f64,
}

/// Response from `/v1/cryptocurrency/listings/latest`
#[derive(Debug, Clone, Deserialize)]
pub struct ListingsResponse {
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub data: Vec<Listing>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub quote: ListingQuote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingQuote {
    #[serde(rename = "USD")]
    pub usd: UsdQuote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsdQuote {
    pub price: f64,
    #[serde(default)]
    pub percent_change_1h: f64,
    #[serde(default)]
    pub percent_change_24h: f64,
}

impl From<GlobalMetricsResponse> for GlobalMetrics {
    fn from(response: GlobalMetricsResponse) -> Self {
        GlobalMetrics {
            btc_dominance: response.data.btc_dominance,
        }
    }
}

impl From<Listing> for AssetQuote {
    fn from(listing: Listing) -> Self {
        AssetQuote {
            id: listing.id,
            name: listing.name,
            symbol: listing.symbol,
            price_usd: listing.quote.usd.price,
            percent_change_1h: listing.quote.usd.percent_change_1h,
            percent_change_24h: listing.quote.usd.percent_change_24h,
        }
    }
}
