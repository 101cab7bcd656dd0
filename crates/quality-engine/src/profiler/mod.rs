//! Data profiling module for dataset analysis.
//!
//! This module provides the read-only quality checks:
//! - Missing-cell counts per column
//! - Exact duplicate rows
//! - Tukey-fence outliers per numeric column
//! - The composite quality score and grade
//! - Per-column type summary and descriptive statistics

pub(crate) mod statistics;

use crate::config::{DUPLICATE_WEIGHT, MISSING_WEIGHT, OUTLIER_WEIGHT};
use crate::dataset::{Column, ColumnKind, Dataset};
use crate::types::{
    ColumnDescription, ColumnOutliers, ColumnTypeInfo, DataTypeSummary, DuplicateReport,
    MissingColumn, MissingnessReport, OutlierReport, QualityScore,
};
use crate::utils::{percentage, round_to};
use indexmap::IndexMap;
use statistics::{TukeyFences, mean, quantile_sorted, sample_std, sorted};
use std::collections::HashSet;
use tracing::debug;

/// Data profiler for measuring dataset quality.
///
/// Every method borrows the dataset and returns a fresh report.
pub struct DataProfiler;

impl DataProfiler {
    /// Count missing cells per column and in total.
    pub fn detect_missing(ds: &Dataset) -> MissingnessReport {
        let rows = ds.row_count();
        let missing_per_column: IndexMap<String, MissingColumn> = ds
            .columns()
            .iter()
            .map(|col| {
                let count = col.missing_count();
                let entry = MissingColumn {
                    count,
                    pct: percentage(count, rows),
                };
                (col.name().to_string(), entry)
            })
            .collect();
        let total_missing = missing_per_column.values().map(|c| c.count).sum();

        MissingnessReport {
            total_rows: rows,
            total_columns: ds.column_count(),
            missing_per_column,
            total_missing,
        }
    }

    /// Count rows that repeat an earlier row exactly.
    pub fn detect_duplicates(ds: &Dataset) -> DuplicateReport {
        let duplicate_rows = duplicate_mask(ds).iter().filter(|dup| **dup).count();
        DuplicateReport { duplicate_rows }
    }

    /// Apply the 1.5 x IQR rule to each numeric column.
    pub fn detect_outliers(ds: &Dataset) -> OutlierReport {
        let mut outliers_per_column = IndexMap::new();
        let mut total_outliers = 0;

        for col in ds.numeric_columns() {
            let values = col.numeric_values();
            let entry = match TukeyFences::from_values(&values) {
                Some(fences) => ColumnOutliers {
                    count: fences.count_outliers(&values),
                    lower_bound: Some(round_to(fences.lower, 4)),
                    upper_bound: Some(round_to(fences.upper, 4)),
                },
                None => ColumnOutliers {
                    count: 0,
                    lower_bound: None,
                    upper_bound: None,
                },
            };
            total_outliers += entry.count;
            outliers_per_column.insert(col.name().to_string(), entry);
        }

        OutlierReport {
            outliers_per_column,
            total_outliers,
        }
    }

    /// Composite 0-100 score penalizing missing cells, duplicate rows and outliers.
    ///
    /// An empty dataset scores 0 (grade F).
    pub fn compute_quality_score(ds: &Dataset) -> QualityScore {
        let (rows, cols) = ds.shape();
        let total_cells = rows * cols;
        if total_cells == 0 {
            return QualityScore::new(0.0);
        }

        let missing_ratio = ds.total_missing() as f64 / total_cells as f64;
        let dup_ratio = Self::detect_duplicates(ds).duplicate_rows as f64 / rows.max(1) as f64;

        let mut outlier_count = 0;
        let mut numeric_cells = 0;
        for col in ds.numeric_columns() {
            let values = col.numeric_values();
            numeric_cells += values.len();
            if let Some(fences) = TukeyFences::from_values(&values) {
                outlier_count += fences.count_outliers(&values);
            }
        }
        let outlier_ratio = outlier_count as f64 / numeric_cells.max(1) as f64;

        let penalty =
            missing_ratio * MISSING_WEIGHT + dup_ratio * DUPLICATE_WEIGHT + outlier_ratio * OUTLIER_WEIGHT;
        let score = round_to((100.0 - penalty).clamp(0.0, 100.0), 1);

        debug!(missing_ratio, dup_ratio, outlier_ratio, score, "Computed quality score");
        QualityScore::new(score)
    }

    /// Declared dtype, kind and distinct count for every column.
    pub fn data_types_summary(ds: &Dataset) -> DataTypeSummary {
        ds.columns()
            .iter()
            .map(|col| {
                let info = ColumnTypeInfo {
                    dtype: col.dtype().to_string(),
                    kind: col.kind(),
                    unique: col.unique_count(),
                };
                (col.name().to_string(), info)
            })
            .collect()
    }

    /// Descriptive statistics per column.
    pub fn describe(ds: &Dataset) -> IndexMap<String, ColumnDescription> {
        ds.columns()
            .iter()
            .map(|col| (col.name().to_string(), describe_column(col)))
            .collect()
    }
}

/// `true` for every row whose signature already appeared earlier.
pub(crate) fn duplicate_mask(ds: &Dataset) -> Vec<bool> {
    let mut seen = HashSet::with_capacity(ds.row_count());
    (0..ds.row_count())
        .map(|row| !seen.insert(ds.row_key(row)))
        .collect()
}

fn describe_column(col: &Column) -> ColumnDescription {
    let count = col.len() - col.missing_count();

    if col.kind() == ColumnKind::Numeric {
        let values = sorted(&col.numeric_values());
        let rounded = |v: Option<f64>| v.map(|x| round_to(x, 4));
        return ColumnDescription {
            count,
            mean: rounded(mean(&values)),
            std: (!values.is_empty()).then(|| round_to(sample_std(&values), 4)),
            min: rounded(values.first().copied()),
            q25: rounded(quantile_sorted(&values, 0.25)),
            q50: rounded(quantile_sorted(&values, 0.5)),
            q75: rounded(quantile_sorted(&values, 0.75)),
            max: rounded(values.last().copied()),
            ..Default::default()
        };
    }

    let counts = col.value_counts();
    let top = counts.first();
    ColumnDescription {
        count,
        unique: Some(counts.len()),
        top: top.map(|(label, _)| label.clone()),
        freq: top.map(|(_, n)| *n),
        ..Default::default()
    }
}
