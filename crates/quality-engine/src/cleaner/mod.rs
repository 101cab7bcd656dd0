//! Data cleaning module.
//!
//! The catalog of operations is closed:
//! - Filling missing values (mean, median or mode)
//! - Dropping rows with missing values
//! - Removing duplicate rows
//! - Removing outlier rows by Tukey fences
//! - Min-max normalization and z-score standardization
//!
//! Every operation borrows its input and returns a new [`Dataset`].

mod outliers;
mod scaling;

use crate::config::FillStrategy;
use crate::dataset::Dataset;
use crate::imputers::StatisticalImputer;
use crate::profiler::{DataProfiler, duplicate_mask};
use crate::types::{MetricSnapshot, TransformSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One cleaning operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum CleaningOperation {
    FillMissing { strategy: FillStrategy },
    DropMissing,
    RemoveDuplicates,
    RemoveOutliers,
    Normalize,
    Standardize,
}

impl CleaningOperation {
    /// Resolve a missing-value strategy name: `drop` removes rows, anything
    /// else fills with the parsed [`FillStrategy`].
    pub fn for_missing(strategy: &str) -> Self {
        if strategy.trim().eq_ignore_ascii_case("drop") {
            Self::DropMissing
        } else {
            let Ok(strategy) = strategy.parse::<FillStrategy>();
            Self::FillMissing { strategy }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FillMissing { .. } => "fill_missing",
            Self::DropMissing => "drop_missing",
            Self::RemoveDuplicates => "remove_duplicates",
            Self::RemoveOutliers => "remove_outliers",
            Self::Normalize => "normalize",
            Self::Standardize => "standardize",
        }
    }
}

impl std::fmt::Display for CleaningOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FillMissing { strategy } => write!(f, "fill_missing({})", strategy.as_str()),
            other => f.write_str(other.name()),
        }
    }
}

/// A cleaned dataset together with what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    pub dataset: Dataset,
    pub summary: TransformSummary,
}

/// Data cleaner for the fixed transformation catalog.
pub struct DataCleaner;

impl DataCleaner {
    /// Fill missing cells per column.
    pub fn fill_missing(ds: &Dataset, strategy: FillStrategy) -> Dataset {
        StatisticalImputer::fill_missing(ds, strategy)
    }

    /// Remove every row that has a missing cell in any column.
    pub fn drop_missing(ds: &Dataset) -> Dataset {
        let mask: Vec<bool> = (0..ds.row_count()).map(|row| !ds.row_has_missing(row)).collect();
        ds.filter_rows(&mask)
    }

    /// Keep the first occurrence of each row signature.
    pub fn remove_duplicates(ds: &Dataset) -> Dataset {
        let mask: Vec<bool> = duplicate_mask(ds).into_iter().map(|dup| !dup).collect();
        ds.filter_rows(&mask)
    }

    /// Drop outlier rows, one numeric column at a time in column order.
    pub fn remove_outliers(ds: &Dataset) -> Dataset {
        outliers::remove_outliers(ds)
    }

    /// Min-max scale numeric columns to [0, 1].
    pub fn normalize_data(ds: &Dataset) -> Dataset {
        scaling::normalize(ds)
    }

    /// Z-score scale numeric columns.
    pub fn standardize_columns(ds: &Dataset) -> Dataset {
        scaling::standardize(ds)
    }

    /// Run one operation and measure its effect on the relevant metric.
    pub fn apply(ds: &Dataset, op: CleaningOperation) -> TransformOutcome {
        let (dataset, message) = match op {
            CleaningOperation::FillMissing { strategy } => (
                Self::fill_missing(ds, strategy),
                format!("Missing values handled using '{}' strategy.", strategy.as_str()),
            ),
            CleaningOperation::DropMissing => (
                Self::drop_missing(ds),
                "Missing values handled using 'drop' strategy.".to_string(),
            ),
            CleaningOperation::RemoveDuplicates => (
                Self::remove_duplicates(ds),
                "Duplicate rows removed.".to_string(),
            ),
            CleaningOperation::RemoveOutliers => (
                Self::remove_outliers(ds),
                "Outliers removed using IQR method.".to_string(),
            ),
            CleaningOperation::Normalize => (
                Self::normalize_data(ds),
                "Numeric columns normalized (Min-Max scaling).".to_string(),
            ),
            CleaningOperation::Standardize => (
                Self::standardize_columns(ds),
                "Numeric columns standardized (Z-score scaling).".to_string(),
            ),
        };

        let summary = TransformSummary {
            operation: op.name().to_string(),
            message,
            before: snapshot(ds, op),
            after: snapshot(&dataset, op),
        };

        info!(
            "{}: {} -> {} rows",
            op,
            summary.before.rows,
            summary.after.rows
        );

        TransformOutcome { dataset, summary }
    }
}

fn snapshot(ds: &Dataset, op: CleaningOperation) -> MetricSnapshot {
    let mut snap = MetricSnapshot {
        rows: ds.row_count(),
        columns: ds.column_count(),
        ..Default::default()
    };
    match op {
        CleaningOperation::FillMissing { .. } | CleaningOperation::DropMissing => {
            snap.missing = Some(ds.total_missing());
        }
        CleaningOperation::RemoveDuplicates => {
            snap.duplicates = Some(DataProfiler::detect_duplicates(ds).duplicate_rows);
        }
        CleaningOperation::RemoveOutliers => {
            snap.outliers = Some(DataProfiler::detect_outliers(ds).total_outliers);
        }
        CleaningOperation::Normalize | CleaningOperation::Standardize => {}
    }
    snap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use pretty_assertions::assert_eq;

    fn with_duplicates() -> Dataset {
        Dataset::new(vec![
            Column::integer("id", vec![Some(1), Some(2), Some(2), Some(3), Some(4)]),
            Column::categorical("name", vec![Some("a"), Some("b"), Some("b"), Some("c"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn test_for_missing() {
        assert_eq!(CleaningOperation::for_missing("drop"), CleaningOperation::DropMissing);
        assert_eq!(
            CleaningOperation::for_missing("median"),
            CleaningOperation::FillMissing {
                strategy: FillStrategy::Median
            }
        );
        assert_eq!(
            CleaningOperation::for_missing("bogus"),
            CleaningOperation::FillMissing {
                strategy: FillStrategy::Mode
            }
        );
    }

    #[test]
    fn test_operation_serialization() {
        let op = CleaningOperation::FillMissing {
            strategy: FillStrategy::Mean,
        };
        assert_eq!(
            serde_json::to_value(op).unwrap(),
            serde_json::json!({ "operation": "fill_missing", "strategy": "mean" })
        );
        assert_eq!(op.to_string(), "fill_missing(mean)");
        assert_eq!(CleaningOperation::Normalize.to_string(), "normalize");
    }

    #[test]
    fn test_remove_duplicates() {
        let ds = with_duplicates();
        let cleaned = DataCleaner::remove_duplicates(&ds);

        assert_eq!(cleaned.row_count(), 4);
        assert_eq!(DataProfiler::detect_duplicates(&cleaned).duplicate_rows, 0);
        assert_eq!(DataCleaner::remove_duplicates(&cleaned), cleaned);
    }

    #[test]
    fn test_drop_missing() {
        let cleaned = DataCleaner::drop_missing(&with_duplicates());
        assert_eq!(cleaned.row_count(), 4);
        assert_eq!(cleaned.total_missing(), 0);
    }

    #[test]
    fn test_apply_reports_measured_metrics() {
        let outcome = DataCleaner::apply(&with_duplicates(), CleaningOperation::RemoveDuplicates);

        assert_eq!(outcome.summary.operation, "remove_duplicates");
        assert_eq!(outcome.summary.message, "Duplicate rows removed.");
        assert_eq!(
            outcome.summary.before,
            MetricSnapshot {
                rows: 5,
                columns: 2,
                duplicates: Some(1),
                ..Default::default()
            }
        );
        assert_eq!(outcome.summary.after.duplicates, Some(0));
        assert_eq!(outcome.summary.rows_removed(), 1);
    }

    #[test]
    fn test_apply_fill_summary() {
        let op = CleaningOperation::for_missing("mode");
        let outcome = DataCleaner::apply(&with_duplicates(), op);

        assert_eq!(outcome.summary.message, "Missing values handled using 'mode' strategy.");
        assert_eq!(outcome.summary.before.missing, Some(1));
        assert_eq!(outcome.summary.after.missing, Some(0));
        assert_eq!(outcome.dataset.column("name").unwrap().cell_text(4).as_deref(), Some("b"));
    }

    #[test]
    fn test_apply_normalize_keeps_shape() {
        let outcome = DataCleaner::apply(&with_duplicates(), CleaningOperation::Normalize);
        assert_eq!(outcome.summary.after.rows, 5);
        assert_eq!(outcome.summary.after.columns, 2);
        assert_eq!(outcome.summary.after.missing, None);
    }
}
