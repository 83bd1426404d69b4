use reqwest::Client as HttpClient;
use reqwest::header::HeaderValue;
use tracing::warn;

use super::models::{GlobalMetricsResponse, ListingsResponse, Status};
use crate::api::{get_json, ApiError};
use crate::models::{AssetQuote, GlobalMetrics};

const PROVIDER: &str = "CoinMarketCap";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// CoinMarketCap Pro API client
pub struct CoinMarketCapClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl CoinMarketCapClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://pro-api.coinmarketcap.com";

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(http_client: HttpClient, api_key: String, base_url: String) -> Self {
        Self {
            http_client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_key_header(&self) -> Result<HeaderValue, ApiError> {
        HeaderValue::from_str(&self.api_key).map_err(|e| ApiError::Decode {
            provider: PROVIDER,
            reason: format!("API key is not a valid header value: {}", e),
        })
    }

    fn warn_on_status(status: &Status) {
        if status.error_code != 0 {
            warn!(
                "CoinMarketCap returned error code {}: {}",
                status.error_code,
                status.error_message.as_deref().unwrap_or("no message")
            );
        }
    }

    /// GET /v1/global-metrics/quotes/latest
    pub async fn global_metrics(&self) -> Result<GlobalMetrics, ApiError> {
        let url = format!("{}/v1/global-metrics/quotes/latest", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, self.api_key_header()?);

        let response: GlobalMetricsResponse = get_json(PROVIDER, request).await?;
        Self::warn_on_status(&response.status);
        Ok(GlobalMetrics::from(response))
    }

    /// GET /v1/cryptocurrency/listings/latest?limit=N
    ///
    /// Quotes come back in market-cap rank order.
    pub async fn top_listings(&self, limit: u32) -> Result<Vec<AssetQuote>, ApiError> {
        let url = format!("{}/v1/cryptocurrency/listings/latest", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .query(&[("limit", limit)])
            .header(API_KEY_HEADER, self.api_key_header()?);

        let response: ListingsResponse = get_json(PROVIDER, request).await?;
        Self::warn_on_status(&response.status);
        Ok(response.data.into_iter().map(AssetQuote::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_body;
    use crate::api::stub::serve_once;

    fn client(url: String) -> CoinMarketCapClient {
        CoinMarketCapClient::with_base_url(reqwest::Client::new(), "secret-key".to_string(), url)
    }

    #[test]
    fn test_decode_listings() {
        let body = r#"{
            "status": {"error_code": 0, "error_message": null, "credit_count": 1},
            "data": [
                {
                    "id": 1, "name": "Bitcoin", "symbol": "BTC", "slug": "bitcoin",
                    "quote": {"USD": {"price": 64000.5, "percent_change_1h": -0.25, "percent_change_24h": 1.5, "volume_24h": 1.0}}
                },
                {
                    "id": 1027, "name": "Ethereum", "symbol": "ETH",
                    "quote": {"USD": {"price": 3400.1, "percent_change_1h": 0.1, "percent_change_24h": -2.0}}
                }
            ]
        }"#;

        let response: ListingsResponse = decode_body(PROVIDER, body).unwrap();
        let quotes: Vec<AssetQuote> = response.data.into_iter().map(AssetQuote::from).collect();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "BTC");
        assert_eq!(quotes[0].percent_change_1h, -0.25);
        assert_eq!(quotes[1].name, "Ethereum");
        assert_eq!(quotes[1].percent_change_24h, -2.0);
    }

    #[test]
    fn test_decode_global_metrics() {
        let body = r#"{"status": {"error_code": 0}, "data": {"btc_dominance": 55.12, "eth_dominance": 17.3}}"#;
        let response: GlobalMetricsResponse = decode_body(PROVIDER, body).unwrap();
        assert_eq!(GlobalMetrics::from(response).btc_dominance, 55.12);
    }

    #[test]
    fn test_global_metrics_without_data_fails() {
        let body = r#"{"status": {"error_code": 1002, "error_message": "API key missing."}}"#;
        assert!(decode_body::<GlobalMetricsResponse>(PROVIDER, body).is_err());
    }

    #[tokio::test]
    async fn test_top_listings_request() {
        let body = r#"{"status": {"error_code": 0}, "data": [
            {"id": 1, "name": "Bitcoin", "symbol": "BTC", "quote": {"USD": {"price": 1.0, "percent_change_1h": 0.5, "percent_change_24h": -0.5}}}
        ]}"#;
        let (url, server) = serve_once("200 OK", body).await;

        let quotes = client(url).top_listings(5).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "BTC");
        assert!(
            request.starts_with("GET /v1/cryptocurrency/listings/latest?limit=5 "),
            "{}",
            request
        );
        let request = request.to_lowercase();
        assert!(request.contains("x-cmc_pro_api_key: secret-key"), "{}", request);
        assert!(request.contains("accept: application/json"), "{}", request);
    }

    #[tokio::test]
    async fn test_global_metrics_request() {
        let body = r#"{"status": {"error_code": 0}, "data": {"btc_dominance": 54.3}}"#;
        let (url, server) = serve_once("200 OK", body).await;

        let metrics = client(format!("{}/", url)).global_metrics().await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(metrics.btc_dominance, 54.3);
        assert!(request.starts_with("GET /v1/global-metrics/quotes/latest "), "{}", request);
        assert!(request.to_lowercase().contains("x-cmc_pro_api_key: secret-key"));
    }

    #[tokio::test]
    async fn test_rejected_key_surfaces_status() {
        let body = r#"{"status": {"error_code": 1001, "error_message": "This API Key is invalid."}}"#;
        let (url, server) = serve_once("401 Unauthorized", body).await;

        let err = client(url).top_listings(5).await.unwrap_err();
        server.await.unwrap();

        match err {
            ApiError::UpstreamStatus { status, body, .. } => {
                assert_eq!(status, 401);
                assert!(body.contains("This API Key is invalid."));
            }
            other => panic!("expected upstream status error, got {:?}", other),
        }
    }
}
