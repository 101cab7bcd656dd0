//! Report and summary types shared across the engine.
//!
//! Everything here is plain data. Column-keyed maps are [`IndexMap`]s so the
//! serialized JSON keeps the dataset's column order.

use crate::dataset::ColumnKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Profiler reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub count: usize,
    /// Percentage of all rows, two decimals.
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MissingnessReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub missing_per_column: IndexMap<String, MissingColumn>,
    pub total_missing: usize,
}

impl MissingnessReport {
    /// Column with the most missing cells; the first one wins a tie.
    pub fn worst_column(&self) -> Option<(&str, usize)> {
        let mut worst: Option<(&str, usize)> = None;
        for (name, entry) in &self.missing_per_column {
            if worst.is_none_or(|(_, count)| entry.count > count) {
                worst = Some((name.as_str(), entry.count));
            }
        }
        worst
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub duplicate_rows: usize,
}

/// Tukey fence result for one numeric column.
///
/// Bounds are `None` when the column has no non-missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub count: usize,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutlierReport {
    pub outliers_per_column: IndexMap<String, ColumnOutliers>,
    pub total_outliers: usize,
}

impl OutlierReport {
    /// Column with the most outliers; the first one wins a tie.
    pub fn worst_column(&self) -> Option<(&str, usize)> {
        let mut worst: Option<(&str, usize)> = None;
        for (name, entry) in &self.outliers_per_column {
            if worst.is_none_or(|(_, count)| entry.count > count) {
                worst = Some((name.as_str(), entry.count));
            }
        }
        worst
    }
}

/// Letter grade derived from the quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 75.0 {
            Grade::B
        } else if score >= 60.0 {
            Grade::C
        } else if score >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    /// 0 to 100, one decimal.
    pub score: f64,
    pub grade: Grade,
}

impl QualityScore {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            grade: Grade::from_score(score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTypeInfo {
    pub dtype: String,
    pub kind: ColumnKind,
    pub unique: usize,
}

/// Column name -> declared dtype, kind and distinct count.
pub type DataTypeSummary = IndexMap<String, ColumnTypeInfo>;

// ============================================================================
// Insights
// ============================================================================

/// A suggested next cleaning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: String,
    pub label: String,
    pub reason: String,
}

// ============================================================================
// Summary report
// ============================================================================

/// Descriptive statistics for one column.
///
/// Numeric columns fill the moment and quantile fields, other columns fill
/// `unique`, `top` and `freq`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub q50: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
    pub unique: Option<usize>,
    pub top: Option<String>,
    pub freq: Option<usize>,
}

/// Everything the profiler and insight engine know about a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub rows: usize,
    pub columns: usize,
    pub missing: MissingnessReport,
    pub duplicates: DuplicateReport,
    pub outliers: OutlierReport,
    pub quality: QualityScore,
    pub insights: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub data_types: DataTypeSummary,
    pub describe: IndexMap<String, ColumnDescription>,
}

// ============================================================================
// Transformation summaries
// ============================================================================

/// Metrics captured on one side of a transformation.
///
/// Only the metric relevant to the operation is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub rows: usize,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<usize>,
}

/// What a cleaning operation did, for display next to the new dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSummary {
    pub operation: String,
    pub message: String,
    pub before: MetricSnapshot,
    pub after: MetricSnapshot,
}

impl TransformSummary {
    pub fn rows_removed(&self) -> usize {
        self.before.rows.saturating_sub(self.after.rows)
    }
}

static_assertions::assert_impl_all!(QualityReport: Send, Sync);
static_assertions::assert_impl_all!(TransformSummary: Send, Sync);
