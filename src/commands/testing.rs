//! In-memory stand-ins for the upstream APIs, chart backends and Discord.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serenity::async_trait;
use tempfile::TempDir;

use super::reply::{Reply, SendError};
use crate::api::ApiError;
use crate::models::{AssetQuote, ChartArtifact, GlobalMetrics, SentimentReading};
use crate::services::chart_backend::{symbol_chart_path, ChartRenderer, DefaultChart, OVERVIEW_CHART_FILE};
use crate::services::chart_service::ChartError;
use crate::services::market_service::MarketData;
use crate::utils::format::chart_menu;

pub struct FakeMarket {
    failing: Option<&'static str>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeMarket {
    pub fn healthy() -> Arc<Self> {
        Arc::new(Self {
            failing: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Fails with a 500 at `stage`: "sentiment", "listings" or "global"
    pub fn failing_at(stage: &'static str) -> Arc<Self> {
        Arc::new(Self {
            failing: Some(stage),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record<T>(&self, stage: &'static str, value: T) -> Result<T, ApiError> {
        self.calls.lock().unwrap().push(stage);
        if self.failing == Some(stage) {
            return Err(ApiError::UpstreamStatus {
                provider: "fake",
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(value)
    }
}

fn quote(id: i64, name: &str, symbol: &str, price: f64, h1: f64, h24: f64) -> AssetQuote {
    AssetQuote {
        id,
        name: name.to_string(),
        symbol: symbol.to_string(),
        price_usd: price,
        percent_change_1h: h1,
        percent_change_24h: h24,
    }
}

#[async_trait]
impl MarketData for FakeMarket {
    async fn sentiment(&self) -> Result<SentimentReading, ApiError> {
        self.record("sentiment", SentimentReading::from_raw("25", "Fear", "1720051200"))
    }

    async fn top_listings(&self, _limit: u32) -> Result<Vec<AssetQuote>, ApiError> {
        self.record(
            "listings",
            vec![
                quote(1, "Bitcoin", "BTC", 64000.0, -0.4, 1.2),
                quote(1027, "Ethereum", "ETH", 3400.0, 0.2, -2.5),
            ],
        )
    }

    async fn global_metrics(&self) -> Result<GlobalMetrics, ApiError> {
        self.record("global", GlobalMetrics { btc_dominance: 55.0 })
    }
}

enum ChartOutcome {
    Rendered,
    RenderFails,
    FileMissing,
    Menu,
}

pub struct FakeCharts {
    dir: TempDir,
    outcome: ChartOutcome,
    calls: Mutex<Vec<String>>,
}

impl FakeCharts {
    pub const IMAGE: &'static [u8] = b"\x89PNG\r\n\x1a\nfake";

    fn with(outcome: ChartOutcome) -> Arc<Self> {
        Arc::new(Self {
            dir: tempfile::tempdir().unwrap(),
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn rendering() -> Arc<Self> {
        Self::with(ChartOutcome::Rendered)
    }

    pub fn failing() -> Arc<Self> {
        Self::with(ChartOutcome::RenderFails)
    }

    /// Claims success but never writes the file
    pub fn missing_file() -> Arc<Self> {
        Self::with(ChartOutcome::FileMissing)
    }

    pub fn menu() -> Arc<Self> {
        Self::with(ChartOutcome::Menu)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn produce(&self, path: PathBuf) -> Result<ChartArtifact, ChartError> {
        match self.outcome {
            ChartOutcome::RenderFails => Err(ChartError::Draw("No space left on device".to_string())),
            ChartOutcome::FileMissing => Ok(ChartArtifact::new(path)),
            ChartOutcome::Rendered | ChartOutcome::Menu => {
                std::fs::write(&path, Self::IMAGE).unwrap();
                Ok(ChartArtifact::new(path))
            }
        }
    }
}

#[async_trait]
impl ChartRenderer for FakeCharts {
    async fn render_symbol(&self, symbol: &str) -> Result<ChartArtifact, ChartError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        self.produce(symbol_chart_path(self.dir.path(), symbol))
    }

    async fn render_default(&self) -> Result<DefaultChart, ChartError> {
        self.calls.lock().unwrap().push(String::new());
        if let ChartOutcome::Menu = self.outcome {
            return Ok(DefaultChart::Menu(chart_menu()));
        }
        self.produce(self.dir.path().join(OVERVIEW_CHART_FILE))
            .map(DefaultChart::Image)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text(String),
    File { name: String, size: usize },
}

#[derive(Default)]
pub struct RecordingReply {
    sent: Mutex<Vec<Sent>>,
    reject_files: bool,
}

impl RecordingReply {
    pub fn rejecting_files() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_files: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Reply for RecordingReply {
    async fn text(&self, content: &str) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(Sent::Text(content.to_string()));
        Ok(())
    }

    async fn file(&self, filename: &str, data: Vec<u8>) -> Result<(), SendError> {
        if self.reject_files {
            return Err(SendError("Request entity too large".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::File {
            name: filename.to_string(),
            size: data.len(),
        });
        Ok(())
    }
}
