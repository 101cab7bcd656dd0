//! Statistical helpers shared by the profiler, transformer and chart builders.
//!
//! All functions operate on plain `f64` slices that never contain missing
//! cells; callers strip `None` before calling in.

use crate::config::FENCE_MULTIPLIER;

/// Copy and sort values ascending.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile of sorted values using linear interpolation between order statistics.
pub(crate) fn quantile_sorted(values: &[f64], quantile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(values[lower]);
    }
    let weight = pos - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * weight)
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/// Sample standard deviation (n - 1). Fewer than two values give 0.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    variance.sqrt()
}

/// Tukey fences derived from the quartiles of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TukeyFences {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl TukeyFences {
    /// Fences from sorted values; `None` for an empty sample.
    pub fn from_sorted(values: &[f64]) -> Option<Self> {
        let q1 = quantile_sorted(values, 0.25)?;
        let q3 = quantile_sorted(values, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            lower: q1 - FENCE_MULTIPLIER * iqr,
            upper: q3 + FENCE_MULTIPLIER * iqr,
        })
    }

    /// Fences from unsorted values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Self::from_sorted(&sorted(values))
    }

    /// Strictly outside either fence. A zero-width fence is still a fence.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }

    pub fn count_outliers(&self, values: &[f64]) -> usize {
        values.iter().filter(|v| self.is_outlier(**v)).count()
    }
}

/// Pearson correlation over rows where both cells are present.
///
/// `None` when fewer than two complete pairs exist or either side has zero
/// variance.
pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
