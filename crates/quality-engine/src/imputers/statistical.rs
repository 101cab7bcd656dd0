//! Statistical imputation methods.
//!
//! Numeric columns are filled with the mean, median or mode of their present
//! values. Every other column kind is filled with its mode.

use crate::config::{FillStrategy, UNKNOWN_PLACEHOLDER};
use crate::dataset::{Column, ColumnData, ColumnKind, Dataset};
use crate::profiler::statistics::{mean, median, sorted};
use crate::utils::format_number;
use std::collections::BTreeMap;
use tracing::debug;

/// Statistical imputation for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill the missing cells of every column that has any.
    ///
    /// Columns without missing cells are returned unchanged.
    pub fn fill_missing(ds: &Dataset, strategy: FillStrategy) -> Dataset {
        let columns = ds
            .columns()
            .iter()
            .map(|col| {
                if col.missing_count() == 0 {
                    col.clone()
                } else {
                    Self::fill_column(col, strategy)
                }
            })
            .collect();
        ds.with_columns(columns)
    }

    fn fill_column(col: &Column, strategy: FillStrategy) -> Column {
        match col.data() {
            ColumnData::Numeric(cells) => {
                let present: Vec<f64> = cells.iter().flatten().copied().collect();
                let (value, dtype) = if present.is_empty() {
                    (0.0, col.dtype().to_string())
                } else {
                    match strategy {
                        FillStrategy::Mean => (mean(&present).unwrap_or(0.0), "Float64".to_string()),
                        FillStrategy::Median => {
                            (median(&present).unwrap_or(0.0), "Float64".to_string())
                        }
                        FillStrategy::Mode => {
                            (numeric_mode(&present).unwrap_or(0.0), col.dtype().to_string())
                        }
                    }
                };
                debug!(
                    "Filled '{}' with {} ({})",
                    col.name(),
                    format_number(value),
                    strategy.as_str()
                );
                let filled = cells.iter().map(|c| Some(c.unwrap_or(value))).collect();
                col.with_dtype_and_data(dtype, ColumnData::Numeric(filled))
            }
            ColumnData::Categorical(cells) => {
                let fill = ord_mode(cells.iter().flatten().cloned())
                    .unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string());
                debug!("Filled '{}' with mode: '{}'", col.name(), fill);
                let filled = cells
                    .iter()
                    .map(|c| Some(c.clone().unwrap_or_else(|| fill.clone())))
                    .collect();
                col.with_data(ColumnData::Categorical(filled))
            }
            ColumnData::Boolean(cells) => match ord_mode(cells.iter().flatten().copied()) {
                Some(fill) => {
                    debug!("Filled '{}' with mode: {}", col.name(), fill);
                    let filled = cells.iter().map(|c| Some(c.unwrap_or(fill))).collect();
                    col.with_data(ColumnData::Boolean(filled))
                }
                None => unknown_column(col),
            },
            ColumnData::Datetime(cells) => match ord_mode(cells.iter().flatten().copied()) {
                Some(fill) => {
                    debug!("Filled '{}' with mode: {}", col.name(), fill);
                    let filled = cells.iter().map(|c| Some(c.unwrap_or(fill))).collect();
                    col.with_data(ColumnData::Datetime(filled))
                }
                None => unknown_column(col),
            },
        }
    }
}

/// An all-missing non-text column becomes a text column of placeholders.
fn unknown_column(col: &Column) -> Column {
    debug!(
        "Column '{}' has no values, filling with '{}'",
        col.name(),
        UNKNOWN_PLACEHOLDER
    );
    let cells = vec![Some(UNKNOWN_PLACEHOLDER.to_string()); col.len()];
    col.with_dtype_and_data(
        ColumnKind::Categorical.default_dtype(),
        ColumnData::Categorical(cells),
    )
}

/// Most frequent value; ties go to the smallest.
pub(crate) fn numeric_mode(values: &[f64]) -> Option<f64> {
    let values = sorted(values);
    let mut best: Option<(f64, usize)> = None;
    let mut idx = 0;

    while idx < values.len() {
        let value = values[idx];
        let run = values[idx..].iter().take_while(|v| **v == value).count();
        if best.is_none_or(|(_, count)| run > count) {
            best = Some((value, run));
        }
        idx += run;
    }

    best.map(|(value, _)| value)
}

/// Most frequent value of an ordered type; ties go to the smallest.
fn ord_mode<T: Ord>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mean_fill() {
        let ds = Dataset::new(vec![Column::integer(
            "x",
            vec![None, Some(2), Some(2), Some(4)],
        )])
        .unwrap();

        let filled = StatisticalImputer::fill_missing(&ds, FillStrategy::Mean);
        let x = filled.column("x").unwrap();

        let first = x.as_numeric().unwrap()[0].unwrap();
        assert!((first - 8.0 / 3.0).abs() < 1e-12);
        assert_eq!(x.dtype(), "Float64");
        assert_eq!(filled.total_missing(), 0);
        // input untouched
        assert_eq!(ds.total_missing(), 1);
    }

    #[test]
    fn test_median_fill() {
        let ds = Dataset::new(vec![Column::numeric(
            "x",
            vec![Some(1.0), None, Some(10.0), Some(3.0)],
        )])
        .unwrap();

        let filled = StatisticalImputer::fill_missing(&ds, FillStrategy::Median);
        assert_eq!(
            filled.column("x").unwrap().as_numeric().unwrap(),
            &[Some(1.0), Some(3.0), Some(10.0), Some(3.0)]
        );
    }

    #[test]
    fn test_mode_fill_numeric_tie_picks_smallest() {
        let ds = Dataset::new(vec![Column::integer(
            "x",
            vec![Some(7), Some(3), None, Some(7), Some(3)],
        )])
        .unwrap();

        let filled = StatisticalImputer::fill_missing(&ds, FillStrategy::Mode);
        let x = filled.column("x").unwrap();
        assert_eq!(x.as_numeric().unwrap()[2], Some(3.0));
        assert_eq!(x.dtype(), "Int64");
    }

    #[test]
    fn test_all_missing_numeric_fills_zero() {
        let ds = Dataset::new(vec![Column::numeric("x", vec![None, None])]).unwrap();

        for strategy in [FillStrategy::Mean, FillStrategy::Median, FillStrategy::Mode] {
            let filled = StatisticalImputer::fill_missing(&ds, strategy);
            assert_eq!(
                filled.column("x").unwrap().as_numeric().unwrap(),
                &[Some(0.0), Some(0.0)]
            );
        }
    }

    #[test]
    fn test_categorical_fill_ignores_strategy() {
        let ds = Dataset::new(vec![Column::categorical(
            "city",
            vec![Some("Lima"), None, Some("Oslo"), Some("Lima")],
        )])
        .unwrap();

        let filled = StatisticalImputer::fill_missing(&ds, FillStrategy::Mean);
        assert_eq!(
            filled.column("city").unwrap().cell_text(1).as_deref(),
            Some("Lima")
        );
    }

    #[test]
    fn test_all_missing_text_gets_placeholder() {
        let ds = Dataset::new(vec![
            Column::categorical::<&str>("note", vec![None, None]),
            Column::boolean("flag", vec![None, None]),
        ])
        .unwrap();

        let filled = StatisticalImputer::fill_missing(&ds, FillStrategy::Mode);

        assert_eq!(filled.column("note").unwrap().cell_text(0).as_deref(), Some("Unknown"));
        let flag = filled.column("flag").unwrap();
        assert_eq!(flag.kind(), ColumnKind::Categorical);
        assert_eq!(flag.dtype(), "String");
        assert_eq!(flag.cell_text(1).as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_boolean_and_datetime_mode() {
        let day = |d| {
            NaiveDate::from_ymd_opt(2024, 5, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let ds = Dataset::new(vec![
            Column::boolean("flag", vec![Some(true), None, Some(false)]),
            Column::datetime("seen", vec![Some(day(9)), Some(day(2)), None]),
        ])
        .unwrap();

        let filled = StatisticalImputer::fill_missing(&ds, FillStrategy::Mode);

        assert_eq!(filled.column("flag").unwrap().cell_text(1).as_deref(), Some("false"));
        assert_eq!(
            filled.column("seen").unwrap().cell_text(2).as_deref(),
            Some("2024-05-02 00:00:00")
        );
    }

    #[test]
    fn test_columns_without_missing_untouched() {
        let ds = Dataset::new(vec![
            Column::integer("id", vec![Some(1), Some(2)]),
            Column::numeric("x", vec![None, Some(5.0)]),
        ])
        .unwrap();

        let filled = StatisticalImputer::fill_missing(&ds, FillStrategy::Mean);
        assert_eq!(filled.column("id"), ds.column("id"));
    }

    #[test]
    fn test_numeric_mode() {
        assert_eq!(numeric_mode(&[2.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(numeric_mode(&[5.0, 4.0]), Some(4.0));
        assert_eq!(numeric_mode(&[]), None);
    }
}
