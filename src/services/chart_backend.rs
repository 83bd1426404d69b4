//! Chart backends behind the `!chart` command.
//!
//! The dispatcher only sees [`ChartRenderer`]; which backend runs is picked
//! from `CHART_MODE` at startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serenity::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::api::fear_greed::HISTORY_DAYS;
use crate::api::placeholder::{capitalize, sample_dominance_history, sample_price_history};
use crate::api::{CoinGeckoClient, FearGreedClient};
use crate::config::{ChartConfig, ChartMode};
use crate::models::{ChartArtifact, ChartSeries};
use crate::services::chart_service::{render_line_chart, render_series, render_stacked_chart, ChartError};
use crate::utils::format::chart_menu;

pub const OVERVIEW_CHART_FILE: &str = "market_overview_chart.png";

/// What bare `!chart` answers with
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultChart {
    Menu(String),
    Image(ChartArtifact),
}

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Chart for one asset, written to `<symbol>_price_chart.png`
    async fn render_symbol(&self, symbol: &str) -> Result<ChartArtifact, ChartError>;

    /// Response to `!chart` with no argument
    async fn render_default(&self) -> Result<DefaultChart, ChartError>;
}

/// Symbols end up in file names and process arguments, so keep them plain.
pub fn validate_symbol(symbol: &str) -> Result<(), ChartError> {
    let valid = !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ChartError::InvalidInput(format!("unsupported symbol '{}'", symbol)))
    }
}

/// Run synchronous plotters work on the blocking pool.
pub async fn run_blocking<T, F>(draw: F) -> Result<T, ChartError>
where
    F: FnOnce() -> Result<T, ChartError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(draw)
        .await
        .map_err(|e| ChartError::Draw(format!("chart task failed: {}", e)))?
}

pub fn symbol_chart_path(output_dir: &Path, symbol: &str) -> PathBuf {
    output_dir.join(format!("{}_price_chart.png", symbol))
}

/// Runs `<python> <script> <symbol>` and expects the script to write the PNG.
pub struct ScriptRenderer {
    python: String,
    script: PathBuf,
    output_dir: PathBuf,
}

impl ScriptRenderer {
    pub fn new(python: String, script: PathBuf, output_dir: PathBuf) -> Self {
        // The script runs inside output_dir
        let script = if script.is_relative() {
            std::env::current_dir()
                .map(|cwd| cwd.join(&script))
                .unwrap_or(script)
        } else {
            script
        };

        Self {
            python,
            script,
            output_dir,
        }
    }
}

#[async_trait]
impl ChartRenderer for ScriptRenderer {
    async fn render_symbol(&self, symbol: &str) -> Result<ChartArtifact, ChartError> {
        validate_symbol(symbol)?;
        info!("🐍 Running {} {} {}", self.python, self.script.display(), symbol);

        let status = Command::new(&self.python)
            .arg(&self.script)
            .arg(symbol)
            .current_dir(&self.output_dir)
            .status()
            .await
            .map_err(ChartError::Spawn)?;

        if !status.success() {
            return Err(ChartError::Process(status));
        }

        Ok(ChartArtifact::new(symbol_chart_path(&self.output_dir, symbol)))
    }

    async fn render_default(&self) -> Result<DefaultChart, ChartError> {
        Ok(DefaultChart::Menu(chart_menu()))
    }
}

/// Fear & Greed history stacked over the sample dominance series.
async fn render_market_overview(
    fear_greed: &FearGreedClient,
    output_dir: &Path,
) -> Result<DefaultChart, ChartError> {
    let readings = fear_greed.history(HISTORY_DAYS).await?;
    debug!("Fetched {} historical Fear and Greed readings", readings.len());

    let sentiment = ChartSeries::new(
        "Fear and Greed Index (Last 6 Months)",
        readings.iter().map(|r| r.date_label()).collect(),
        readings.iter().map(|r| f64::from(r.value)).collect(),
    )?;
    let dominance = sample_dominance_history()?;

    let path = output_dir.join(OVERVIEW_CHART_FILE);
    let target = path.clone();
    run_blocking(move || render_stacked_chart(&target, &sentiment, &dominance)).await?;

    Ok(DefaultChart::Image(ChartArtifact::new(path)))
}

/// In-process charts from the fixed sample price history.
pub struct SampleRenderer {
    fear_greed: Arc<FearGreedClient>,
    output_dir: PathBuf,
}

impl SampleRenderer {
    pub fn new(fear_greed: Arc<FearGreedClient>, output_dir: PathBuf) -> Self {
        Self {
            fear_greed,
            output_dir,
        }
    }
}

#[async_trait]
impl ChartRenderer for SampleRenderer {
    async fn render_symbol(&self, symbol: &str) -> Result<ChartArtifact, ChartError> {
        validate_symbol(symbol)?;

        let series = sample_price_history(symbol)?;
        let path = symbol_chart_path(&self.output_dir, symbol);
        let target = path.clone();
        run_blocking(move || render_series(&target, &series)).await?;

        Ok(ChartArtifact::new(path))
    }

    async fn render_default(&self) -> Result<DefaultChart, ChartError> {
        render_market_overview(&self.fear_greed, &self.output_dir).await
    }
}

/// In-process charts from CoinGecko's 180-day price history.
pub struct CoinGeckoRenderer {
    coingecko: CoinGeckoClient,
    fear_greed: Arc<FearGreedClient>,
    output_dir: PathBuf,
}

impl CoinGeckoRenderer {
    pub fn new(coingecko: CoinGeckoClient, fear_greed: Arc<FearGreedClient>, output_dir: PathBuf) -> Self {
        Self {
            coingecko,
            fear_greed,
            output_dir,
        }
    }
}

#[async_trait]
impl ChartRenderer for CoinGeckoRenderer {
    async fn render_symbol(&self, symbol: &str) -> Result<ChartArtifact, ChartError> {
        validate_symbol(symbol)?;

        let history = self.coingecko.market_chart(symbol, HISTORY_DAYS).await?;
        let title = format!("{} Price Over Last 6 Months", capitalize(symbol));

        let path = symbol_chart_path(&self.output_dir, symbol);
        let target = path.clone();
        run_blocking(move || render_line_chart(&target, &title, &history.dates, &history.prices)).await?;

        Ok(ChartArtifact::new(path))
    }

    async fn render_default(&self) -> Result<DefaultChart, ChartError> {
        render_market_overview(&self.fear_greed, &self.output_dir).await
    }
}

/// Pick the backend configured by `CHART_MODE`.
pub fn build_renderer(
    config: &ChartConfig,
    http_client: reqwest::Client,
    fear_greed: Arc<FearGreedClient>,
    coingecko_url: &str,
) -> Arc<dyn ChartRenderer> {
    let output_dir = config.output_dir.clone();
    match config.mode {
        ChartMode::Script => Arc::new(ScriptRenderer::new(
            config.python.clone(),
            config.script.clone(),
            output_dir,
        )),
        ChartMode::Sample => Arc::new(SampleRenderer::new(fear_greed, output_dir)),
        ChartMode::Live => Arc::new(CoinGeckoRenderer::new(
            CoinGeckoClient::with_base_url(http_client, coingecko_url.to_string()),
            fear_greed,
            output_dir,
        )),
    }
}
