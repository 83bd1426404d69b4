use tracing::{error, info, warn};

use super::reply::{Reply, SendError};
use crate::models::ChartArtifact;
use crate::services::chart_backend::{ChartRenderer, DefaultChart};

/// Texts sent when a stage after rendering fails
struct FailureText {
    open: String,
    send: String,
}

pub async fn execute(
    charts: &dyn ChartRenderer,
    symbol: Option<&str>,
    reply: &dyn Reply,
) -> Result<(), SendError> {
    match symbol {
        Some(symbol) => execute_symbol(charts, symbol, reply).await,
        None => execute_default(charts, reply).await,
    }
}

async fn execute_symbol(charts: &dyn ChartRenderer, symbol: &str, reply: &dyn Reply) -> Result<(), SendError> {
    info!("🎨 Chart requested for {}", symbol);

    let artifact = match charts.render_symbol(symbol).await {
        Ok(artifact) => artifact,
        Err(e) => {
            error!("Chart generation error for {}: {}", symbol, e);
            return reply.text(&format!("Error generating chart for {}.", symbol)).await;
        }
    };

    let failure = FailureText {
        open: format!("Error opening chart file for {}.", symbol),
        send: format!("Error sending chart file for {}.", symbol),
    };
    send_artifact(&artifact, &failure, reply).await
}

async fn execute_default(charts: &dyn ChartRenderer, reply: &dyn Reply) -> Result<(), SendError> {
    let artifact = match charts.render_default().await {
        Ok(DefaultChart::Menu(menu)) => return reply.text(&menu).await,
        Ok(DefaultChart::Image(artifact)) => artifact,
        Err(e) => {
            error!("Market chart generation error: {}", e);
            return reply.text("Error generating market chart.").await;
        }
    };

    let failure = FailureText {
        open: "Error opening market chart file.".to_string(),
        send: "Error sending market chart file.".to_string(),
    };
    send_artifact(&artifact, &failure, reply).await
}

/// Read the rendered image and post it as an attachment.
///
/// The file is fully read and closed before the send starts.
async fn send_artifact(artifact: &ChartArtifact, failure: &FailureText, reply: &dyn Reply) -> Result<(), SendError> {
    let data = match tokio::fs::read(artifact.path()).await {
        Ok(data) if !data.is_empty() => data,
        Ok(_) => {
            warn!("Chart file {} is empty", artifact.path().display());
            return reply.text(&failure.open).await;
        }
        Err(e) => {
            error!("Failed to open chart file {}: {}", artifact.path().display(), e);
            return reply.text(&failure.open).await;
        }
    };

    let size = data.len();
    if let Err(e) = reply.file(&artifact.file_name(), data).await {
        error!("Failed to send chart {}: {}", artifact.file_name(), e);
        return reply.text(&failure.send).await;
    }

    info!("✓ Chart {} sent ({} bytes)", artifact.file_name(), size);
    Ok(())
}
