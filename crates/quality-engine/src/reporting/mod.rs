//! Report generation module.
//!
//! [`ReportGenerator::build_summary`] profiles a dataset once and bundles the
//! reports, score, insights, suggestions and per-column statistics into a
//! [`QualityReport`](crate::types::QualityReport). The report can be
//! printed as JSON, written to `<stem>_report.json`, or rendered as text.
//!
//! # Example
//!
//! ```rust,ignore
//! use quality_engine::{EngineConfig, ReportGenerator};
//!
//! let report = ReportGenerator::build_summary(&dataset, &EngineConfig::default());
//! println!("{}", ReportGenerator::render_text(&report));
//! ReportGenerator::write_report_to_file(&report, Path::new("outputs"), "train")?;
//! ```

mod generator;

pub use generator::ReportGenerator;
