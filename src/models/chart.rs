//! Chart generation models

use std::path::{Path, PathBuf};

use crate::services::chart_service::ChartError;

/// An ordered series ready to plot.
///
/// Labels and values always have the same, non-zero length. Points are drawn
/// in the order given, never sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
    title: String,
}

impl ChartSeries {
    pub fn new(
        title: impl Into<String>,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> Result<Self, ChartError> {
        if labels.len() != values.len() {
            return Err(ChartError::InvalidInput(format!(
                "{} labels but {} values",
                labels.len(),
                values.len()
            )));
        }
        if values.is_empty() {
            return Err(ChartError::InvalidInput("series is empty".to_string()));
        }

        Ok(Self {
            labels,
            values,
            title: title.into(),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// A rendered chart image on disk
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub path: PathBuf,
}

impl ChartArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attachment name shown in Discord
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chart.png".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = ChartSeries::new("t", vec!["a".into()], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_series_rejected() {
        let err = ChartSeries::new("t", vec![], vec![]).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_order_preserved() {
        let series = ChartSeries::new("t", vec!["b".into(), "a".into()], vec![2.0, 1.0]).unwrap();
        assert_eq!(series.labels(), &["b".to_string(), "a".to_string()]);
        assert_eq!(series.values(), &[2.0, 1.0]);
    }

    #[test]
    fn test_artifact_file_name() {
        let artifact = ChartArtifact::new("/tmp/charts/dogecoin_price_chart.png");
        assert_eq!(artifact.file_name(), "dogecoin_price_chart.png");
    }
}
