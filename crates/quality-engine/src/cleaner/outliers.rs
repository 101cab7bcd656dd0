//! Row removal by Tukey fences.
//!
//! Fences are recomputed for each numeric column against the rows that
//! survived the previous columns, so the column order influences the final
//! row set when outliers are correlated across columns. A second pass can
//! therefore still remove rows.

use crate::dataset::Dataset;
use crate::profiler::statistics::TukeyFences;
use tracing::debug;

/// Drop rows whose value lies outside its column's fences, column by column.
///
/// Missing cells never cause a row to be dropped.
pub(crate) fn remove_outliers(ds: &Dataset) -> Dataset {
    let numeric: Vec<String> = ds.numeric_columns().map(|c| c.name().to_string()).collect();
    let mut current = ds.clone();

    for name in &numeric {
        let Some(col) = current.column(name) else {
            continue;
        };
        let Some(cells) = col.as_numeric() else {
            continue;
        };
        let Some(fences) = TukeyFences::from_values(&col.numeric_values()) else {
            continue;
        };

        let mask: Vec<bool> = cells
            .iter()
            .map(|cell| cell.is_none_or(|v| !fences.is_outlier(v)))
            .collect();
        let removed = mask.iter().filter(|keep| !**keep).count();

        if removed > 0 {
            debug!(
                "Removed {} rows outside [{}, {}] in '{}'",
                removed, fences.lower, fences.upper, name
            );
            current = current.filter_rows(&mask);
        }
    }

    current
}
