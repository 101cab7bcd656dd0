//! Conversion between [`Dataset`] and polars [`DataFrame`].

use super::{Column, ColumnData, Dataset};
use crate::error::{QualityError, Result, ResultExt};
use crate::utils::{DtypeCategory, dtype_name, get_dtype_category};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::{Column as FrameColumn, DataFrame, DataType, NamedFrom, Series, TimeUnit};
use tracing::debug;

fn millis_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, None)
}

impl TryFrom<&DataFrame> for Dataset {
    type Error = QualityError;

    fn try_from(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let name = series.name().to_string();
            columns.push(series_to_column(&name, series).context(format!("Converting column '{name}'"))?);
        }

        debug!(rows = df.height(), columns = columns.len(), "Converted DataFrame into dataset");
        Dataset::new(columns)
    }
}

fn series_to_column(name: &str, series: &Series) -> Result<Column> {
    let dtype = series.dtype();
    let data = match get_dtype_category(dtype) {
        DtypeCategory::Numeric => {
            let floats = series.cast(&DataType::Float64)?;
            ColumnData::Numeric(floats.f64()?.into_iter().collect())
        }
        DtypeCategory::Boolean => ColumnData::Boolean(series.bool()?.into_iter().collect()),
        DtypeCategory::String => {
            let text = series.cast(&DataType::String)?;
            let values = text
                .str()?
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect();
            ColumnData::Categorical(values)
        }
        DtypeCategory::Datetime => {
            let millis = series.cast(&millis_dtype())?.cast(&DataType::Int64)?;
            let values = millis
                .i64()?
                .into_iter()
                .map(|v| v.and_then(millis_to_datetime))
                .collect();
            ColumnData::Datetime(values)
        }
        DtypeCategory::Other => {
            return Err(QualityError::UnsupportedDtype {
                column: name.to_string(),
                dtype: dtype.to_string(),
            });
        }
    };

    Ok(Column::new(name, dtype_name(dtype), data))
}

fn millis_to_datetime(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

impl Dataset {
    /// Convert into a polars frame for CSV export or further processing.
    ///
    /// Numeric columns come back as `Int64` when their declared dtype is an
    /// integer type and every value is integral, `Float64` otherwise.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut series: Vec<FrameColumn> = Vec::with_capacity(self.column_count());

        for column in self.columns() {
            let name = column.name().into();
            let s = match column.data() {
                ColumnData::Numeric(values) => {
                    let integral = values.iter().flatten().all(|v| v.fract() == 0.0);
                    if column.is_integer_dtype() && integral {
                        let ints: Vec<Option<i64>> =
                            values.iter().map(|v| v.map(|x| x as i64)).collect();
                        Series::new(name, ints)
                    } else {
                        Series::new(name, values.as_slice())
                    }
                }
                ColumnData::Categorical(values) => Series::new(name, values.as_slice()),
                ColumnData::Boolean(values) => Series::new(name, values.as_slice()),
                ColumnData::Datetime(values) => {
                    let millis: Vec<Option<i64>> = values
                        .iter()
                        .map(|v| v.map(|d| d.and_utc().timestamp_millis()))
                        .collect();
                    Series::new(name, millis).cast(&millis_dtype())?
                }
            };
            series.push(s.into());
        }

        DataFrame::new(series).context("Building DataFrame from dataset")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, ColumnKind};
    use chrono::NaiveDate;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_dataframe_kinds() {
        let df = df![
            "age" => [Some(31i64), None, Some(45)],
            "score" => [1.5, f64::NAN, 3.0],
            "city" => [Some("Oslo"), Some("Lima"), None],
            "active" => [Some(true), None, Some(false)],
        ]
        .unwrap();

        let ds = Dataset::try_from(&df).unwrap();

        assert_eq!(ds.shape(), (3, 4));
        let age = ds.column("age").unwrap();
        assert_eq!(age.kind(), ColumnKind::Numeric);
        assert_eq!(age.dtype(), "Int64");
        assert_eq!(age.as_numeric().unwrap(), &[Some(31.0), None, Some(45.0)]);

        // NaN is a missing cell, not a value
        let score = ds.column("score").unwrap();
        assert_eq!(score.missing_count(), 1);

        assert_eq!(ds.column("city").unwrap().kind(), ColumnKind::Categorical);
        assert_eq!(ds.column("city").unwrap().dtype(), "String");
        assert_eq!(ds.column("active").unwrap().kind(), ColumnKind::Boolean);
    }

    #[test]
    fn test_from_dataframe_datetime() {
        let millis = Series::new("ts".into(), &[Some(1_577_836_800_000i64), None])
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap();
        let df = DataFrame::new(vec![millis.into()]).unwrap();

        let ds = Dataset::try_from(&df).unwrap();
        let ts = ds.column("ts").unwrap();

        assert_eq!(ts.kind(), ColumnKind::Datetime);
        assert_eq!(ts.dtype(), "Datetime");
        assert_eq!(ts.cell_text(0).as_deref(), Some("2020-01-01 00:00:00"));
        assert!(ts.is_missing(1));
    }

    #[test]
    fn test_unsupported_dtype_rejected() {
        let times = Series::new("clock".into(), &[3_600_000_000_000i64])
            .cast(&DataType::Time)
            .unwrap();
        let df = DataFrame::new(vec![times.into()]).unwrap();

        let err = Dataset::try_from(&df).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_DTYPE");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_round_trip_keeps_integer_columns() {
        let ds = Dataset::new(vec![
            Column::integer("count", vec![Some(1), None, Some(3)]),
            Column::numeric("ratio", vec![Some(0.5), Some(1.0), None]),
            Column::datetime(
                "seen",
                vec![
                    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(3, 4, 5),
                    None,
                    None,
                ],
            ),
        ])
        .unwrap();

        let df = ds.to_dataframe().unwrap();
        assert_eq!(df.column("count").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("ratio").unwrap().dtype(), &DataType::Float64);

        let back = Dataset::try_from(&df).unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn test_scaled_integer_column_exports_as_float() {
        let ds = Dataset::new(vec![Column::integer("n", vec![Some(1), Some(2)])
            .with_data(ColumnData::Numeric(vec![Some(0.0), Some(0.5)]))])
        .unwrap();

        let df = ds.to_dataframe().unwrap();
        assert_eq!(df.column("n").unwrap().dtype(), &DataType::Float64);
    }
}
