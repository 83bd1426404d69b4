//! Market quote models

/// Priced asset snapshot from a top-listings call
#[derive(Debug, Clone, PartialEq)]
pub struct AssetQuote {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub price_usd: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
}

impl AssetQuote {
    /// `BTC#1`: symbol plus upstream id, for logs
    pub fn log_label(&self) -> String {
        format!("{}#{}", self.symbol, self.id)
    }
}

/// Global market metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalMetrics {
    /// Bitcoin's share of total market cap, in percent
    pub btc_dominance: f64,
}

impl GlobalMetrics {
    pub fn is_bitcoin_dominant(&self) -> bool {
        self.btc_dominance > 50.0
    }
}
