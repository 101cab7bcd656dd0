//! In-memory, column-oriented dataset.
//!
//! A [`Dataset`] is an ordered list of uniquely named [`Column`]s that all have
//! the same length. Each column stores its cells as a tagged [`ColumnData`]
//! variant with `None` as the missing marker; there are no NaN sentinels.
//!
//! Datasets are value objects. Profiling and chart functions borrow them,
//! cleaning functions return new ones.

mod column;
mod frame;

pub use column::{CellKey, Column, ColumnData, ColumnKind};

use crate::config::EngineConfig;
use crate::error::{QualityError, Result};
use indexmap::IndexMap;
use std::collections::HashSet;

/// An ordered collection of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate names and mismatched lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::with_capacity(columns.len());

        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(QualityError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != rows {
                return Err(QualityError::ColumnLengthMismatch {
                    column: column.name().to_string(),
                    expected: rows,
                    found: column.len(),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild from columns already known to be consistent.
    pub(crate) fn from_parts(columns: Vec<Column>, rows: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == rows));
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    /// True when the dataset has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Numeric columns in declaration order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.kind() == ColumnKind::Numeric)
    }

    /// Total number of missing cells across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// The row signature: one hashable key per column.
    pub fn row_key(&self, row: usize) -> Vec<CellKey> {
        self.columns.iter().map(|c| c.cell_key(row)).collect()
    }

    /// Whether any cell of the row is missing.
    pub fn row_has_missing(&self, row: usize) -> bool {
        self.columns.iter().any(|c| c.is_missing(row))
    }

    /// Keep the rows whose mask entry is `true`.
    pub fn filter_rows(&self, mask: &[bool]) -> Dataset {
        debug_assert_eq!(mask.len(), self.rows);
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(idx, keep)| keep.then_some(idx))
            .collect();
        self.take_rows(&indices)
    }

    /// Select rows by index, in the given order.
    pub fn take_rows(&self, indices: &[usize]) -> Dataset {
        let columns = self.columns.iter().map(|c| c.take(indices)).collect();
        Self::from_parts(columns, indices.len())
    }

    /// Replace the columns while keeping the row count.
    pub(crate) fn with_columns(&self, columns: Vec<Column>) -> Dataset {
        Self::from_parts(columns, self.rows)
    }

    /// First rows as JSON records (column name -> value, missing as null).
    ///
    /// At most `min(n, config.preview_rows)` rows are returned.
    pub fn preview(&self, n: usize, config: &EngineConfig) -> Vec<IndexMap<String, serde_json::Value>> {
        let limit = n.min(config.preview_rows).min(self.rows);
        (0..limit)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| (c.name().to_string(), c.cell_json(row)))
                    .collect()
            })
            .collect()
    }
}

static_assertions::assert_impl_all!(Dataset: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::numeric("age", vec![Some(31.0), None, Some(45.0)]),
            Column::categorical("city", vec![Some("Oslo"), Some("Lima"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0)]),
            Column::numeric("b", vec![Some(1.0)]),
        ]);

        assert!(matches!(
            result.unwrap_err(),
            QualityError::ColumnLengthMismatch { column, expected: 2, found: 1 } if column == "b"
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::boolean("a", vec![Some(true)]),
        ]);

        assert!(matches!(result.unwrap_err(), QualityError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_new_stores_nan_as_missing() {
        let with_nan = Dataset::new(vec![Column::numeric(
            "age",
            vec![Some(10.0), Some(12.0), Some(f64::NAN), Some(11.0), Some(1000.0)],
        )])
        .unwrap();
        let with_none = Dataset::new(vec![Column::numeric(
            "age",
            vec![Some(10.0), Some(12.0), None, Some(11.0), Some(1000.0)],
        )])
        .unwrap();

        assert_eq!(with_nan, with_none);
        assert_eq!(with_nan.total_missing(), 1);
        assert_eq!(
            with_nan.column("age").unwrap().numeric_values(),
            vec![10.0, 12.0, 11.0, 1000.0]
        );
        assert_eq!(
            crate::profiler::DataProfiler::detect_outliers(&with_nan),
            crate::profiler::DataProfiler::detect_outliers(&with_none)
        );
    }

    #[test]
    fn test_empty_dataset_shape() {
        let ds = Dataset::empty();
        assert_eq!(ds.shape(), (0, 0));
        assert!(ds.is_empty());

        let no_rows = Dataset::new(vec![Column::numeric("a", vec![])]).unwrap();
        assert_eq!(no_rows.shape(), (0, 1));
        assert!(no_rows.is_empty());
    }

    #[test]
    fn test_total_missing_and_row_flags() {
        let ds = sample();
        assert_eq!(ds.total_missing(), 2);
        assert!(!ds.row_has_missing(0));
        assert!(ds.row_has_missing(1));
        assert!(ds.row_has_missing(2));
    }

    #[test]
    fn test_filter_rows_keeps_order() {
        let ds = sample();
        let filtered = ds.filter_rows(&[true, false, true]);

        assert_eq!(filtered.shape(), (2, 2));
        assert_eq!(
            filtered.column("age").unwrap().as_numeric().unwrap(),
            &[Some(31.0), Some(45.0)]
        );
        // input untouched
        assert_eq!(ds.row_count(), 3);
    }

    #[test]
    fn test_row_key_treats_missing_as_equal() {
        let ds = Dataset::new(vec![
            Column::numeric("x", vec![None, None, Some(1.0)]),
            Column::categorical("y", vec![Some("a"), Some("a"), Some("a")]),
        ])
        .unwrap();

        assert_eq!(ds.row_key(0), ds.row_key(1));
        assert_ne!(ds.row_key(0), ds.row_key(2));
    }

    #[test]
    fn test_preview_respects_limit_and_nulls() {
        let ds = sample();
        let config = EngineConfig::builder().preview_rows(2).build().unwrap();
        let rows = ds.preview(50, &config);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["age"], json!(31.0));
        assert_eq!(rows[1]["age"], serde_json::Value::Null);
        assert_eq!(rows[1]["city"], json!("Lima"));
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["age", "city"]);
    }

    #[test]
    fn test_numeric_columns_in_order() {
        let ds = Dataset::new(vec![
            Column::numeric("b", vec![Some(1.0)]),
            Column::categorical("c", vec![Some("x")]),
            Column::integer("a", vec![Some(2)]),
        ])
        .unwrap();

        let names: Vec<&str> = ds.numeric_columns().map(Column::name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
