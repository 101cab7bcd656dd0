//! Min-max and z-score scaling of numeric columns.

use crate::dataset::{Column, ColumnData, Dataset};
use crate::profiler::statistics::{mean, sample_std};
use tracing::debug;

const SCALED_DTYPE: &str = "Float64";

/// Rescale every numeric column to [0, 1]. Constant columns become all 0.0.
pub(crate) fn normalize(ds: &Dataset) -> Dataset {
    scale_numeric(ds, |col, values| {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if range == 0.0 {
            debug!("Column '{}' has zero range, writing 0.0", col.name());
            return None;
        }
        let scale: Scaler = Box::new(move |x: f64| (x - min) / range);
        Some(scale)
    })
}

/// Center every numeric column on 0 with unit sample standard deviation.
/// Constant columns become all 0.0.
pub(crate) fn standardize(ds: &Dataset) -> Dataset {
    scale_numeric(ds, |col, values| {
        let center = mean(values)?;
        let std = sample_std(values);
        if std == 0.0 {
            debug!("Column '{}' has zero variance, writing 0.0", col.name());
            return None;
        }
        let scale: Scaler = Box::new(move |x: f64| (x - center) / std);
        Some(scale)
    })
}

type Scaler = Box<dyn Fn(f64) -> f64>;

/// Apply a per-column scaler built from the column's present values.
///
/// All-missing columns are left alone. When `build` returns `None` the column
/// is degenerate and every cell, missing or not, becomes 0.0.
fn scale_numeric<F>(ds: &Dataset, build: F) -> Dataset
where
    F: Fn(&Column, &[f64]) -> Option<Scaler>,
{
    let columns = ds
        .columns()
        .iter()
        .map(|col| {
            let Some(cells) = col.as_numeric() else {
                return col.clone();
            };
            let values = col.numeric_values();
            if values.is_empty() {
                return col.clone();
            }

            let scaled = match build(col, &values) {
                Some(scale) => cells.iter().map(|c| c.map(&scale)).collect(),
                None => vec![Some(0.0); cells.len()],
            };
            col.with_dtype_and_data(SCALED_DTYPE, ColumnData::Numeric(scaled))
        })
        .collect();

    ds.with_columns(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(ds: &Dataset, name: &str) -> Vec<Option<f64>> {
        ds.column(name).unwrap().as_numeric().unwrap().to_vec()
    }

    #[test]
    fn test_normalize_bounds() {
        let ds = Dataset::new(vec![Column::integer(
            "x",
            vec![Some(5), Some(15), None, Some(10)],
        )])
        .unwrap();

        let out = normalize(&ds);

        assert_eq!(cells(&out, "x"), vec![Some(0.0), Some(1.0), None, Some(0.5)]);
        assert_eq!(out.column("x").unwrap().dtype(), "Float64");
    }

    #[test]
    fn test_normalize_constant_column() {
        let ds = Dataset::new(vec![Column::numeric("x", vec![Some(3.0), None, Some(3.0)])]).unwrap();
        assert_eq!(cells(&normalize(&ds), "x"), vec![Some(0.0); 3]);
    }

    #[test]
    fn test_standardize_moments() {
        let ds = Dataset::new(vec![Column::numeric(
            "x",
            vec![Some(2.0), Some(4.0), Some(4.0), Some(4.0), Some(5.0), Some(5.0), Some(7.0), Some(9.0)],
        )])
        .unwrap();

        let out = standardize(&ds);
        let values = out.column("x").unwrap().numeric_values();

        let m = mean(&values).unwrap();
        assert!(m.abs() < 1e-12);
        assert!((sample_std(&values) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_standardize_constant_and_single_value() {
        let ds = Dataset::new(vec![
            Column::numeric("flat", vec![Some(1.0), Some(1.0)]),
            Column::numeric("single", vec![Some(7.0), None]),
        ])
        .unwrap();

        let out = standardize(&ds);
        assert_eq!(cells(&out, "flat"), vec![Some(0.0), Some(0.0)]);
        assert_eq!(cells(&out, "single"), vec![Some(0.0), Some(0.0)]);
    }

    #[test]
    fn test_scaling_skips_non_numeric_and_empty() {
        let ds = Dataset::new(vec![
            Column::categorical("c", vec![Some("a"), None]),
            Column::numeric("empty", vec![None, None]),
        ])
        .unwrap();

        assert_eq!(normalize(&ds), ds);
        assert_eq!(standardize(&ds), ds);
    }
}
