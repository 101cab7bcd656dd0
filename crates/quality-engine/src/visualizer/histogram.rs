//! Equal-width binning.

use crate::utils::{format_number, round_to};

/// Bin edges and counts for a set of values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bins {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Bins {
    /// `"{low}–{high}"` labels with edges rounded to two decimals.
    pub fn labels(&self) -> Vec<String> {
        self.edges
            .windows(2)
            .map(|w| {
                format!(
                    "{}–{}",
                    format_number(round_to(w[0], 2)),
                    format_number(round_to(w[1], 2))
                )
            })
            .collect()
    }
}

/// Split `[min, max]` into `bins` equal-width bins and count values per bin.
///
/// Bins are half-open except the last, which also takes `max`. A constant
/// sample spans `[v - 0.5, v + 0.5]`. `None` for an empty sample or zero bins.
pub(crate) fn equal_width_bins(values: &[f64], bins: usize) -> Option<Bins> {
    if values.is_empty() || bins == 0 {
        return None;
    }

    let mut first = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut last = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if first == last {
        first -= 0.5;
        last += 0.5;
    }

    let step = (last - first) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| first + i as f64 * step).collect();
    edges.push(last);

    let mut counts = vec![0usize; bins];
    let scale = bins as f64 / (last - first);

    for &value in values {
        let mut idx = if value == last {
            bins - 1
        } else {
            (((value - first) * scale) as usize).min(bins - 1)
        };
        // correct for rounding in the scaled index
        if idx > 0 && value < edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && value >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    Some(Bins { edges, counts })
}
