//! Data Quality Engine Library
//!
//! Profiling, scoring, cleaning and chart aggregation for in-memory tabular
//! datasets, with [polars](https://pola.rs) interop at the edges.
//!
//! # Overview
//!
//! The engine is four stateless components over a [`Dataset`]:
//!
//! - **Profiler** ([`DataProfiler`]): missing cells, exact duplicate rows,
//!   Tukey-fence outliers, a 0-100 quality score with a letter grade
//! - **Transformer** ([`DataCleaner`]): fill or drop missing values, remove
//!   duplicates and outliers, min-max or z-score scaling
//! - **Insights** ([`InsightEngine`]): human-readable findings and suggested
//!   next steps
//! - **Visualizer** ([`Visualizer`]): bar, histogram, box plot, correlation,
//!   missing-value heatmap and before/after payloads
//!
//! Every operation borrows its input and returns a new value. Only building a
//! [`Dataset`] (or converting a polars frame) and validating an
//! [`EngineConfig`] can fail.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use quality_engine::{CleaningOperation, DataCleaner, Dataset, EngineConfig, ReportGenerator};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .try_into_reader_with_file_path(Some("data.csv".into()))?
//!     .finish()?;
//! let dataset = Dataset::try_from(&df)?;
//!
//! let report = ReportGenerator::build_summary(&dataset, &EngineConfig::default());
//! println!("Score: {} ({})", report.quality.score, report.quality.grade);
//!
//! let outcome = DataCleaner::apply(&dataset, CleaningOperation::RemoveDuplicates);
//! println!("{}", outcome.summary.message);
//! ```
//!
//! # Configuration
//!
//! Chart truncation limits live in [`EngineConfig`]:
//!
//! ```rust,ignore
//! let config = EngineConfig::builder()
//!     .histogram_bins(20)
//!     .heatmap_rows(50)
//!     .build()?;
//! let charts = Visualizer::new(config).bundle(&original, &current);
//! ```

pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod imputers;
pub mod insights;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;
pub mod visualizer;

pub use cleaner::{CleaningOperation, DataCleaner, TransformOutcome};
pub use config::{ConfigValidationError, EngineConfig, EngineConfigBuilder, FillStrategy};
pub use dataset::{Column, ColumnData, ColumnKind, Dataset};
pub use error::{QualityError, Result, ResultExt};
pub use imputers::StatisticalImputer;
pub use insights::{InsightEngine, ProfileView};
pub use profiler::DataProfiler;
pub use reporting::ReportGenerator;
pub use types::{
    DuplicateReport, Grade, MissingnessReport, OutlierReport, QualityReport, QualityScore,
    Suggestion, TransformSummary,
};
pub use visualizer::{ChartSpec, VisualizationBundle, Visualizer};
