//! Configuration types for the quality engine.
//!
//! Every top-N truncation applied by the chart builders and the report
//! generator is a named field here, so the limits are part of the contract
//! rather than incidental slicing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weight of the missing-cell ratio in the quality score.
pub const MISSING_WEIGHT: f64 = 40.0;

/// Weight of the duplicate-row ratio in the quality score.
pub const DUPLICATE_WEIGHT: f64 = 30.0;

/// Weight of the outlier ratio in the quality score.
pub const OUTLIER_WEIGHT: f64 = 30.0;

/// Tukey fence multiplier applied to the interquartile range.
pub const FENCE_MULTIPLIER: f64 = 1.5;

/// Placeholder written into non-numeric columns that have no value to take a mode from.
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Strategy for filling missing numeric values.
///
/// Non-numeric columns always use the most frequent value regardless of the
/// strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Use the mean of non-missing values
    #[default]
    Mean,
    /// Use the median of non-missing values
    Median,
    /// Use the most frequent non-missing value
    Mode,
}

impl FillStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
        }
    }
}

/// Parsing never fails: anything other than `mean` or `median` selects the mode.
impl FromStr for FillStrategy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Self::Mean,
            "median" => Self::Median,
            _ => Self::Mode,
        })
    }
}

/// Configuration for chart aggregation, previews and insight text.
///
/// Use [`EngineConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use quality_engine::config::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .histogram_bins(20)
///     .heatmap_rows(50)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of equal-width bins per histogram.
    /// Default: 15
    pub histogram_bins: usize,

    /// Number of categorical/boolean columns that get a value-count bar chart.
    /// Default: 3
    pub bar_chart_columns: usize,

    /// Number of most frequent values shown per value-count bar chart.
    /// Default: 10
    pub bar_top_values: usize,

    /// Number of numeric columns that get a histogram.
    /// Default: 4
    pub histogram_columns: usize,

    /// Number of numeric columns that get a box plot.
    /// Default: 5
    pub boxplot_columns: usize,

    /// Maximum number of outlier values sampled into a box plot.
    /// Default: 50
    pub outlier_sample_limit: usize,

    /// Number of leading rows covered by the missing-value heatmap.
    /// Default: 100
    pub heatmap_rows: usize,

    /// Maximum number of rows returned by a dataset preview.
    /// Default: 200
    pub preview_rows: usize,

    /// Number of numeric column names listed in the normalization insight.
    /// Default: 5
    pub insight_column_names: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 15,
            bar_chart_columns: 3,
            bar_top_values: 10,
            histogram_columns: 4,
            boxplot_columns: 5,
            outlier_sample_limit: 50,
            heatmap_rows: 100,
            preview_rows: 200,
            insight_column_names: 5,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let limits = [
            ("histogram_bins", self.histogram_bins),
            ("bar_chart_columns", self.bar_chart_columns),
            ("bar_top_values", self.bar_top_values),
            ("histogram_columns", self.histogram_columns),
            ("boxplot_columns", self.boxplot_columns),
            ("outlier_sample_limit", self.outlier_sample_limit),
            ("heatmap_rows", self.heatmap_rows),
            ("preview_rows", self.preview_rows),
            ("insight_column_names", self.insight_column_names),
        ];

        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigValidationError::ZeroLimit(field.to_string()));
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid limit for '{0}': must be at least 1")]
    ZeroLimit(String),
}

impl From<ConfigValidationError> for crate::error::QualityError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::QualityError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`EngineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    histogram_bins: Option<usize>,
    bar_chart_columns: Option<usize>,
    bar_top_values: Option<usize>,
    histogram_columns: Option<usize>,
    boxplot_columns: Option<usize>,
    outlier_sample_limit: Option<usize>,
    heatmap_rows: Option<usize>,
    preview_rows: Option<usize>,
    insight_column_names: Option<usize>,
}

impl EngineConfigBuilder {
    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set how many categorical columns get a value-count bar chart.
    pub fn bar_chart_columns(mut self, columns: usize) -> Self {
        self.bar_chart_columns = Some(columns);
        self
    }

    /// Set how many values each value-count bar chart shows.
    pub fn bar_top_values(mut self, values: usize) -> Self {
        self.bar_top_values = Some(values);
        self
    }

    /// Set how many numeric columns get a histogram.
    pub fn histogram_columns(mut self, columns: usize) -> Self {
        self.histogram_columns = Some(columns);
        self
    }

    /// Set how many numeric columns get a box plot.
    pub fn boxplot_columns(mut self, columns: usize) -> Self {
        self.boxplot_columns = Some(columns);
        self
    }

    /// Set the cap on outlier values sampled into each box plot.
    pub fn outlier_sample_limit(mut self, limit: usize) -> Self {
        self.outlier_sample_limit = Some(limit);
        self
    }

    /// Set how many leading rows the missing-value heatmap covers.
    pub fn heatmap_rows(mut self, rows: usize) -> Self {
        self.heatmap_rows = Some(rows);
        self
    }

    /// Set the cap on preview rows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set how many numeric column names the normalization insight lists.
    pub fn insight_column_names(mut self, names: usize) -> Self {
        self.insight_column_names = Some(names);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EngineConfig` or an error if validation fails.
    pub fn build(self) -> Result<EngineConfig, ConfigValidationError> {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            bar_chart_columns: self.bar_chart_columns.unwrap_or(defaults.bar_chart_columns),
            bar_top_values: self.bar_top_values.unwrap_or(defaults.bar_top_values),
            histogram_columns: self.histogram_columns.unwrap_or(defaults.histogram_columns),
            boxplot_columns: self.boxplot_columns.unwrap_or(defaults.boxplot_columns),
            outlier_sample_limit: self
                .outlier_sample_limit
                .unwrap_or(defaults.outlier_sample_limit),
            heatmap_rows: self.heatmap_rows.unwrap_or(defaults.heatmap_rows),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            insight_column_names: self
                .insight_column_names
                .unwrap_or(defaults.insight_column_names),
        };

        config.validate()?;
        Ok(config)
    }
}
