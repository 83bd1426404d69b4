//! Data models shared by the fetchers, formatter and chart renderer
//!
//! Every value here is request-scoped: built by a fetch, handed to at most a
//! couple of functions, then dropped when the command returns.

pub mod chart;
pub mod quote;
pub mod sentiment;

pub use chart::{ChartArtifact, ChartSeries};
pub use quote::{AssetQuote, GlobalMetrics};
pub use sentiment::SentimentReading;
