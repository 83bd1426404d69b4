use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::api::{CoinGeckoClient, CoinMarketCapClient, FearGreedClient};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// How `!chart` produces images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Menu for bare `!chart`, external script per symbol
    Script,
    /// In-process charts from the fixed sample history
    Sample,
    /// In-process charts from CoinGecko prices
    Live,
}

impl FromStr for ChartMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "script" => Ok(ChartMode::Script),
            "sample" => Ok(ChartMode::Sample),
            "live" => Ok(ChartMode::Live),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub mode: ChartMode,
    /// Where chart images are written
    pub output_dir: PathBuf,
    pub python: String,
    pub script: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub fear_greed: String,
    pub coinmarketcap: String,
    pub coingecko: String,
}

/// Everything the bot reads from the environment, loaded once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub discord_token: String,
    pub coinmarketcap_api_key: String,
    pub listing_limit: u32,
    pub chart: ChartConfig,
    pub endpoints: Endpoints,
}

impl BotConfig {
    const DEFAULT_LISTING_LIMIT: u32 = 5;
    /// More quotes than this overflow a single Discord message
    const MAX_LISTING_LIMIT: u32 = 10;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = get("DISCORD_BOT_TOKEN").ok_or(ConfigError::Missing("DISCORD_BOT_TOKEN"))?;

        let coinmarketcap_api_key = get("COINMARKETCAP_API_KEY").unwrap_or_else(|| {
            warn!("⚠️ COINMARKETCAP_API_KEY not set, market requests will be unauthenticated");
            String::new()
        });

        let listing_limit = match get("TOP_LISTING_LIMIT") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(limit) if (1..=Self::MAX_LISTING_LIMIT).contains(&limit) => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "TOP_LISTING_LIMIT",
                        value,
                    })
                }
            },
            None => Self::DEFAULT_LISTING_LIMIT,
        };

        let mode = match get("CHART_MODE") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "CHART_MODE",
                value: value.clone(),
            })?,
            None => ChartMode::Script,
        };

        let chart = ChartConfig {
            mode,
            output_dir: get("CHART_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
            python: get("CHART_PYTHON").unwrap_or_else(|| "python".to_string()),
            script: get("CHART_SCRIPT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("generateChart.py")),
        };

        let endpoints = Endpoints {
            fear_greed: get("FEAR_GREED_URL").unwrap_or_else(|| FearGreedClient::DEFAULT_BASE_URL.to_string()),
            coinmarketcap: get("COINMARKETCAP_URL")
                .unwrap_or_else(|| CoinMarketCapClient::DEFAULT_BASE_URL.to_string()),
            coingecko: get("COINGECKO_URL").unwrap_or_else(|| CoinGeckoClient::DEFAULT_BASE_URL.to_string()),
        };

        Ok(BotConfig {
            discord_token,
            coinmarketcap_api_key,
            listing_limit,
            chart,
            endpoints,
        })
    }
}
