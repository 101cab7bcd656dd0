//! Typed column storage.

use crate::utils::format_number;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Display format for datetime cells rendered as labels.
const DATETIME_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of a column, derived from its stored representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Boolean,
    Datetime,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
        }
    }

    /// Default dtype name for columns built without an explicit one.
    pub fn default_dtype(&self) -> &'static str {
        match self {
            Self::Numeric => "Float64",
            Self::Categorical => "String",
            Self::Boolean => "Boolean",
            Self::Datetime => "Datetime",
        }
    }
}

/// Cell storage; `None` is the missing marker.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
    Datetime(Vec<Option<NaiveDateTime>>),
}

/// Hashable view of a single cell, used for row signatures and distinct counts.
///
/// Missing equals missing. Floats compare by bit pattern after folding `-0.0`
/// into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Missing,
    Number(u64),
    Text(String),
    Bool(bool),
    Timestamp(NaiveDateTime),
}

fn number_key(value: f64) -> CellKey {
    let normalized = if value == 0.0 { 0.0 } else { value };
    CellKey::Number(normalized.to_bits())
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: String,
    data: ColumnData,
}

impl Column {
    /// NaN cells in numeric data are stored as missing.
    pub fn new(name: impl Into<String>, dtype: impl Into<String>, data: ColumnData) -> Self {
        let data = match data {
            ColumnData::Numeric(values) => {
                ColumnData::Numeric(values.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
            }
            other => other,
        };
        Self {
            name: name.into(),
            dtype: dtype.into(),
            data,
        }
    }

    /// Floating point column (`Float64`).
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnKind::Numeric.default_dtype(), ColumnData::Numeric(values))
    }

    /// Integer column (`Int64`), stored as floats.
    pub fn integer(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        let values = values.into_iter().map(|v| v.map(|i| i as f64)).collect();
        Self::new(name, "Int64", ColumnData::Numeric(values))
    }

    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(
            name,
            ColumnKind::Categorical.default_dtype(),
            ColumnData::Categorical(values),
        )
    }

    pub fn boolean(name: impl Into<String>, values: Vec<Option<bool>>) -> Self {
        Self::new(name, ColumnKind::Boolean.default_dtype(), ColumnData::Boolean(values))
    }

    pub fn datetime(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Self::new(
            name,
            ColumnKind::Datetime.default_dtype(),
            ColumnData::Datetime(values),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared storage type name (e.g. `Float64`, `Int64`, `String`).
    pub fn dtype(&self) -> &str {
        &self.dtype
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
            ColumnData::Boolean(_) => ColumnKind::Boolean,
            ColumnData::Datetime(_) => ColumnKind::Datetime,
        }
    }

    /// Whether the declared dtype is an integer type.
    pub fn is_integer_dtype(&self) -> bool {
        let dtype = self.dtype.to_ascii_lowercase();
        dtype.starts_with("int") || dtype.starts_with("uint")
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
            ColumnData::Datetime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Numeric(v) => v[row].is_none(),
            ColumnData::Categorical(v) => v[row].is_none(),
            ColumnData::Boolean(v) => v[row].is_none(),
            ColumnData::Datetime(v) => v[row].is_none(),
        }
    }

    pub fn missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Categorical(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Boolean(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Datetime(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Raw numeric cells, or `None` for non-numeric columns.
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            _ => None,
        }
    }

    /// Non-missing numeric values in row order (empty for non-numeric columns).
    pub fn numeric_values(&self) -> Vec<f64> {
        self.as_numeric()
            .map(|cells| cells.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn cell_key(&self, row: usize) -> CellKey {
        match &self.data {
            ColumnData::Numeric(v) => v[row].map(number_key),
            ColumnData::Categorical(v) => v[row].clone().map(CellKey::Text),
            ColumnData::Boolean(v) => v[row].map(CellKey::Bool),
            ColumnData::Datetime(v) => v[row].map(CellKey::Timestamp),
        }
        .unwrap_or(CellKey::Missing)
    }

    /// Cell rendered as label text, `None` when missing.
    pub fn cell_text(&self, row: usize) -> Option<String> {
        match &self.data {
            ColumnData::Numeric(v) => v[row].map(format_number),
            ColumnData::Categorical(v) => v[row].clone(),
            ColumnData::Boolean(v) => v[row].map(|b| b.to_string()),
            ColumnData::Datetime(v) => v[row].map(|d| d.format(DATETIME_LABEL_FORMAT).to_string()),
        }
    }

    /// Cell as a JSON value; missing becomes `null`, datetimes ISO-8601 text.
    pub fn cell_json(&self, row: usize) -> serde_json::Value {
        use serde_json::Value;
        match &self.data {
            ColumnData::Numeric(v) => v[row]
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ColumnData::Categorical(v) => v[row].clone().map(Value::String).unwrap_or(Value::Null),
            ColumnData::Boolean(v) => v[row].map(Value::Bool).unwrap_or(Value::Null),
            ColumnData::Datetime(v) => v[row]
                .map(|d| Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
                .unwrap_or(Value::Null),
        }
    }

    /// Number of distinct non-missing values.
    pub fn unique_count(&self) -> usize {
        (0..self.len())
            .map(|row| self.cell_key(row))
            .filter(|key| *key != CellKey::Missing)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Non-missing values with their counts, most frequent first.
    ///
    /// Ties keep the order in which values were first encountered.
    pub fn value_counts(&self) -> Vec<(String, usize)> {
        let mut order: Vec<(CellKey, usize)> = Vec::new();
        let mut positions: HashMap<CellKey, usize> = HashMap::new();
        let mut labels: Vec<String> = Vec::new();

        for row in 0..self.len() {
            let key = self.cell_key(row);
            if key == CellKey::Missing {
                continue;
            }
            match positions.get(&key) {
                Some(&pos) => order[pos].1 += 1,
                None => {
                    positions.insert(key.clone(), order.len());
                    order.push((key, 1));
                    labels.push(self.cell_text(row).unwrap_or_default());
                }
            }
        }

        let mut counts: Vec<(String, usize)> = labels
            .into_iter()
            .zip(order)
            .map(|(label, (_, count))| (label, count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Select cells by row index, in the given order.
    pub fn take(&self, indices: &[usize]) -> Column {
        let data = match &self.data {
            ColumnData::Numeric(v) => ColumnData::Numeric(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Categorical(v) => {
                ColumnData::Categorical(indices.iter().map(|&i| v[i].clone()).collect())
            }
            ColumnData::Boolean(v) => ColumnData::Boolean(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Datetime(v) => ColumnData::Datetime(indices.iter().map(|&i| v[i]).collect()),
        };
        Column::new(self.name.clone(), self.dtype.clone(), data)
    }

    /// Same name and dtype, new cells.
    pub(crate) fn with_data(&self, data: ColumnData) -> Column {
        Column::new(self.name.clone(), self.dtype.clone(), data)
    }

    /// Same name, new dtype and cells.
    pub(crate) fn with_dtype_and_data(&self, dtype: impl Into<String>, data: ColumnData) -> Column {
        Column::new(self.name.clone(), dtype, data)
    }
}
