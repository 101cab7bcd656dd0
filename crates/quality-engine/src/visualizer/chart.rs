//! Chart payload types.
//!
//! Every payload serializes with a `type` tag and a `title`. Bar-like charts
//! name their axes through `xKey`/`yKey`; the others use fixed field names.

use indexmap::IndexMap;
use serde::Serialize;

/// A bar height: a count for frequency charts, a float for aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BarValue {
    Count(usize),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub label: String,
    pub value: BarValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub data: Vec<BarDatum>,
    #[serde(rename = "xKey")]
    pub x_key: &'static str,
    #[serde(rename = "yKey")]
    pub y_key: &'static str,
}

impl BarChart {
    pub fn new(title: impl Into<String>, data: Vec<BarDatum>) -> Self {
        Self {
            title: title.into(),
            data,
            x_key: "label",
            y_key: "value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// `"{low}–{high}"` with edges rounded to two decimals.
    pub bin: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub title: String,
    pub column: String,
    pub data: Vec<HistogramBin>,
    #[serde(rename = "xKey")]
    pub x_key: &'static str,
    #[serde(rename = "yKey")]
    pub y_key: &'static str,
}

/// Five-number summary plus whiskers and sampled outliers.
///
/// Any statistic that is undefined serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlot {
    pub title: String,
    pub column: String,
    pub min: Option<f64>,
    #[serde(rename = "Q1")]
    pub q1: Option<f64>,
    pub median: Option<f64>,
    #[serde(rename = "Q3")]
    pub q3: Option<f64>,
    pub max: Option<f64>,
    pub whisker_low: Option<f64>,
    pub whisker_high: Option<f64>,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRow {
    pub column: String,
    pub values: IndexMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub title: String,
    pub columns: Vec<String>,
    pub matrix: Vec<CorrelationRow>,
}

/// One heatmap row: the original row index plus 1 (missing) or 0 per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub row: usize,
    #[serde(flatten)]
    pub cells: IndexMap<String, u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingHeatmap {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<HeatmapRow>,
}

/// Any chart the visualizer produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChart),
    Histogram(Histogram),
    Boxplot(BoxPlot),
    CorrelationMatrix(CorrelationMatrix),
    MissingHeatmap(MissingHeatmap),
    /// Before/after comparison, rendered as a bar chart.
    #[serde(rename = "bar")]
    Comparison(BarChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(c) | ChartSpec::Comparison(c) => &c.title,
            ChartSpec::Histogram(c) => &c.title,
            ChartSpec::Boxplot(c) => &c.title,
            ChartSpec::CorrelationMatrix(c) => &c.title,
            ChartSpec::MissingHeatmap(c) => &c.title,
        }
    }
}
