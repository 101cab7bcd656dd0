//! Chart-ready aggregates derived from datasets.
//!
//! The visualizer reads one or two datasets and never the profiler's reports;
//! fences and statistics it needs are recomputed here. Column and row limits
//! come from [`EngineConfig`].

mod chart;
mod histogram;

pub use chart::{
    BarChart, BarDatum, BarValue, BoxPlot, ChartSpec, CorrelationMatrix, CorrelationRow,
    HeatmapRow, Histogram, HistogramBin, MissingHeatmap,
};

use crate::config::EngineConfig;
use crate::dataset::{Column, ColumnKind, Dataset};
use crate::profiler::DataProfiler;
use crate::profiler::statistics::{TukeyFences, mean, pearson, quantile_sorted, sorted};
use crate::utils::round_to;
use histogram::equal_width_bins;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// All charts for an original dataset and its current cleaned version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationBundle {
    pub bar_charts: Vec<ChartSpec>,
    pub histograms: Vec<ChartSpec>,
    pub boxplots: Vec<ChartSpec>,
    pub correlation: ChartSpec,
    pub missing_heatmap: ChartSpec,
    pub before_after: Vec<ChartSpec>,
}

/// Builds chart payloads under the configured truncation limits.
#[derive(Debug, Clone, Default)]
pub struct Visualizer {
    config: EngineConfig,
}

impl Visualizer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Value counts for the leading categorical/boolean columns, plus a chart
    /// of numeric means when there are at least two numeric columns.
    pub fn bar_chart_data(&self, ds: &Dataset) -> Vec<ChartSpec> {
        let mut charts: Vec<ChartSpec> = ds
            .columns()
            .iter()
            .filter(|c| matches!(c.kind(), ColumnKind::Categorical | ColumnKind::Boolean))
            .take(self.config.bar_chart_columns)
            .map(|col| {
                let data = col
                    .value_counts()
                    .into_iter()
                    .take(self.config.bar_top_values)
                    .map(|(label, count)| BarDatum {
                        label,
                        value: BarValue::Count(count),
                    })
                    .collect();
                ChartSpec::Bar(BarChart::new(format!("Value Counts – {}", col.name()), data))
            })
            .collect();

        let numeric: Vec<&Column> = ds.numeric_columns().collect();
        if numeric.len() >= 2 {
            let data = numeric
                .iter()
                .filter_map(|col| {
                    let m = mean(&col.numeric_values())?;
                    Some(BarDatum {
                        label: col.name().to_string(),
                        value: BarValue::Number(round_to(m, 4)),
                    })
                })
                .collect();
            charts.push(ChartSpec::Bar(BarChart::new("Column Means (Numeric)", data)));
        }

        charts
    }

    /// Equal-width histograms for the leading numeric columns.
    pub fn histogram_data(&self, ds: &Dataset) -> Vec<ChartSpec> {
        ds.numeric_columns()
            .take(self.config.histogram_columns)
            .filter_map(|col| {
                let bins = equal_width_bins(&col.numeric_values(), self.config.histogram_bins)?;
                let data = bins
                    .labels()
                    .into_iter()
                    .zip(bins.counts)
                    .map(|(bin, count)| HistogramBin { bin, count })
                    .collect();
                Some(ChartSpec::Histogram(Histogram {
                    title: format!("Distribution – {}", col.name()),
                    column: col.name().to_string(),
                    data,
                    x_key: "bin",
                    y_key: "count",
                }))
            })
            .collect()
    }

    /// Box plot summaries for the leading numeric columns.
    pub fn boxplot_data(&self, ds: &Dataset) -> Vec<ChartSpec> {
        ds.numeric_columns()
            .take(self.config.boxplot_columns)
            .filter_map(|col| self.boxplot(col).map(ChartSpec::Boxplot))
            .collect()
    }

    fn boxplot(&self, col: &Column) -> Option<BoxPlot> {
        let values = col.numeric_values();
        let ordered = sorted(&values);
        let fences = TukeyFences::from_sorted(&ordered)?;

        let whisker_low = ordered.iter().copied().find(|v| *v >= fences.lower);
        let whisker_high = ordered.iter().rev().copied().find(|v| *v <= fences.upper);
        let outliers = values
            .iter()
            .copied()
            .filter(|v| fences.is_outlier(*v))
            .take(self.config.outlier_sample_limit)
            .collect();

        Some(BoxPlot {
            title: format!("Box Plot – {}", col.name()),
            column: col.name().to_string(),
            min: ordered.first().copied(),
            q1: Some(fences.q1),
            median: quantile_sorted(&ordered, 0.5),
            q3: Some(fences.q3),
            max: ordered.last().copied(),
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Pairwise Pearson correlation between numeric columns.
    ///
    /// Empty when fewer than two numeric columns exist.
    pub fn correlation_matrix(&self, ds: &Dataset) -> ChartSpec {
        let numeric: Vec<&Column> = ds.numeric_columns().collect();
        let title = "Correlation Matrix".to_string();

        if numeric.len() < 2 {
            return ChartSpec::CorrelationMatrix(CorrelationMatrix {
                title,
                columns: Vec::new(),
                matrix: Vec::new(),
            });
        }

        let columns: Vec<String> = numeric.iter().map(|c| c.name().to_string()).collect();
        let matrix = numeric
            .iter()
            .map(|row_col| {
                let x = row_col.as_numeric().unwrap_or_default();
                let values = numeric
                    .iter()
                    .map(|other| {
                        let y = other.as_numeric().unwrap_or_default();
                        let r = pearson(x, y).map(|r| round_to(r, 4));
                        (other.name().to_string(), r)
                    })
                    .collect();
                CorrelationRow {
                    column: row_col.name().to_string(),
                    values,
                }
            })
            .collect();

        debug!("Computed {}x{} correlation matrix", columns.len(), columns.len());
        ChartSpec::CorrelationMatrix(CorrelationMatrix {
            title,
            columns,
            matrix,
        })
    }

    /// Missing-cell indicators for the leading rows.
    pub fn missing_heatmap(&self, ds: &Dataset) -> ChartSpec {
        let columns: Vec<String> = ds.column_names().into_iter().map(str::to_string).collect();
        let rows = (0..ds.row_count().min(self.config.heatmap_rows))
            .map(|row| {
                let cells: IndexMap<String, u8> = ds
                    .columns()
                    .iter()
                    .map(|c| (c.name().to_string(), u8::from(c.is_missing(row))))
                    .collect();
                HeatmapRow { row, cells }
            })
            .collect();

        ChartSpec::MissingHeatmap(MissingHeatmap {
            title: "Missing Values Heatmap".to_string(),
            columns,
            rows,
        })
    }

    /// Row count, missing cells and duplicate rows, before and after.
    pub fn before_after_comparison(&self, before: &Dataset, after: &Dataset) -> Vec<ChartSpec> {
        let pair = |title: &str, b: usize, a: usize| {
            ChartSpec::Comparison(BarChart::new(
                title,
                vec![
                    BarDatum {
                        label: "Before".to_string(),
                        value: BarValue::Count(b),
                    },
                    BarDatum {
                        label: "After".to_string(),
                        value: BarValue::Count(a),
                    },
                ],
            ))
        };

        vec![
            pair(
                "Row Count: Before vs After",
                before.row_count(),
                after.row_count(),
            ),
            pair(
                "Missing Values: Before vs After",
                before.total_missing(),
                after.total_missing(),
            ),
            pair(
                "Duplicate Rows: Before vs After",
                DataProfiler::detect_duplicates(before).duplicate_rows,
                DataProfiler::detect_duplicates(after).duplicate_rows,
            ),
        ]
    }

    /// Every chart: distribution charts from `current`, the heatmap from
    /// `original`, and the comparison between the two.
    pub fn bundle(&self, original: &Dataset, current: &Dataset) -> VisualizationBundle {
        VisualizationBundle {
            bar_charts: self.bar_chart_data(current),
            histograms: self.histogram_data(current),
            boxplots: self.boxplot_data(current),
            correlation: self.correlation_matrix(current),
            missing_heatmap: self.missing_heatmap(original),
            before_after: self.before_after_comparison(original, current),
        }
    }
}
