//! Message text builders. Everything here is pure.

use crate::models::{AssetQuote, GlobalMetrics, SentimentReading};

/// Assets the chart script knows about, as (display name, CoinGecko id)
pub const CHARTABLE_ASSETS: [(&str, &str); 10] = [
    ("Bitcoin", "bitcoin"),
    ("Ethereum", "ethereum"),
    ("Polkadot", "polkadot"),
    ("Ripple", "ripple"),
    ("Cardano", "cardano"),
    ("Dogecoin", "dogecoin"),
    ("Solana", "solana"),
    ("Chainlink", "chainlink"),
    ("Binance Coin", "binancecoin"),
    ("Litecoin", "litecoin"),
];

/// `🔴 -1.23%` for losses, `🟢 1.23%` otherwise
pub fn format_percent_change(change: f64) -> String {
    if change < 0.0 {
        format!("🔴 {:.2}%", change)
    } else {
        format!("🟢 {:.2}%", change)
    }
}

/// Market overview message for `!Market`.
///
/// The fear/greed advice and the season line branch independently, so all four
/// combinations can appear.
pub fn build_market_overview(
    sentiment: &SentimentReading,
    quotes: &[AssetQuote],
    metrics: &GlobalMetrics,
) -> String {
    let mut message = format!(
        "**📊 Fear and Greed Index:**\n**Value:** {}\n**Description:** {}\n\n",
        sentiment.raw_value, sentiment.label
    );

    message.push_str(&format!("**🚀 Top {} Cryptocurrencies:**\n", quotes.len()));
    for quote in quotes {
        message.push_str(&format!(
            "**{} ({})**\nPrice: `${:.2}`\n24h Change: {}\n1h Change: {}\n\n",
            quote.name,
            quote.symbol,
            quote.price_usd,
            format_percent_change(quote.percent_change_24h),
            format_percent_change(quote.percent_change_1h),
        ));
    }

    message.push_str(&format!(
        "**Overview:**\n**🌐 Bitcoin Dominance:** {:.2}%\n",
        metrics.btc_dominance
    ));

    if sentiment.is_fearful() {
        message.push_str("😱 The market is fearful. This might be a good time to buy.\n");
        if metrics.is_bitcoin_dominant() {
            message.push_str("💡 Consider buying Bitcoin due to its dominance.\n");
        } else {
            message.push_str("💡 Consider looking into Altcoins due to their current dominance.\n");
        }
    } else {
        message.push_str("😄 The market is optimistic. Be cautious of potential corrections.\n");
    }

    if metrics.is_bitcoin_dominant() {
        message.push_str("📈 It's currently **Bitcoin season** based on BTC dominance.\n");
    } else {
        message.push_str("📉 It's currently **Altcoin season** based on BTC dominance.\n");
    }

    message
}

pub fn chart_menu() -> String {
    let mut menu = String::from("**Available Cryptocurrencies for Charting:**\n");
    for (name, id) in CHARTABLE_ASSETS {
        menu.push_str(&format!("- {} (`{}`)\n", name, id));
    }
    menu.push_str("\nUse `!chart [crypto name]` to view a chart for a specific cryptocurrency.");
    menu
}

/// Command list; `listing_limit` is how many assets `!Market` shows.
pub fn help_text(listing_limit: u32) -> String {
    [
        "**ℹ️ Available Commands:**".to_string(),
        format!(
            "`!Market` - Display Fear and Greed Index, BTC dominance, top {} cryptocurrencies, and investment advice.",
            listing_limit
        ),
        "`!chart` - Display a list of available cryptocurrencies for charting.".to_string(),
        "`!chart [crypto name]` - Display a chart for the specified cryptocurrency over the last 6 months.".to_string(),
        "`!Help` - Display this help message.".to_string(),
    ]
    .join("\n")
}
