pub mod coingecko;
pub mod coinmarketcap;
pub mod fear_greed;
pub mod placeholder;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub use coingecko::CoinGeckoClient;
pub use coinmarketcap::CoinMarketCapClient;
pub use fear_greed::FearGreedClient;

/// Failure of a single upstream fetch. Always terminal for the command.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure reaching the provider
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// Provider answered with something other than 200
    #[error("{provider} responded with status {status}: {body}")]
    UpstreamStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },
    /// Body was not the JSON shape we expected
    #[error("failed to decode {provider} response: {reason}")]
    Decode {
        provider: &'static str,
        reason: String,
    },
}

/// Send a GET request and decode a 200 JSON body into `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, ApiError> {
    let response = request
        .header(ACCEPT, HeaderValue::from_static("application/json"))
        .send()
        .await
        .map_err(|source| {
            warn!("❌ Error making {} request: {}", provider, source);
            ApiError::Transport { provider, source }
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ApiError::Transport { provider, source })?;

    if status != StatusCode::OK {
        warn!("{} request failed with status {}, response: {}", provider, status.as_u16(), body);
        return Err(ApiError::UpstreamStatus {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    decode_body(provider, &body)
}

/// Decode a raw response body, ignoring fields the shape doesn't name.
pub(crate) fn decode_body<T: DeserializeOwned>(provider: &'static str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        warn!("Error parsing {} response: {}", provider, e);
        ApiError::Decode {
            provider,
            reason: e.to_string(),
        }
    })
}
