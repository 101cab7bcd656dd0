//! Imputation module for handling missing values.
//!
//! Mean, median and mode imputation with fixed fallbacks for columns that
//! have no values at all.

mod statistical;

pub use statistical::StatisticalImputer;
