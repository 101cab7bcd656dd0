use crate::config::EngineConfig;
use crate::dataset::{Column, Dataset};
use crate::error::{Result, ResultExt};
use crate::insights::{InsightEngine, ProfileView};
use crate::profiler::DataProfiler;
use crate::types::QualityReport;
use crate::utils::format_number;
use chrono::Utc;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builds summary reports and writes them out.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Profile a dataset once and bundle every report with insights and
    /// suggestions derived from the same numbers.
    pub fn build_summary(ds: &Dataset, config: &EngineConfig) -> QualityReport {
        let missing = DataProfiler::detect_missing(ds);
        let duplicates = DataProfiler::detect_duplicates(ds);
        let outliers = DataProfiler::detect_outliers(ds);
        let quality = DataProfiler::compute_quality_score(ds);
        let numeric: Vec<&str> = ds.numeric_columns().map(Column::name).collect();

        let view = ProfileView {
            missing: &missing,
            duplicates: &duplicates,
            outliers: &outliers,
            numeric_columns: &numeric,
        };
        let insights = InsightEngine::new(config.clone()).insights_from(view, &quality);
        let suggestions = InsightEngine::suggestions_from(view);

        debug!(
            "Summary built: score {} ({}), {} insights, {} suggestions",
            quality.score,
            quality.grade,
            insights.len(),
            suggestions.len()
        );

        QualityReport {
            rows: ds.row_count(),
            columns: ds.column_count(),
            data_types: DataProfiler::data_types_summary(ds),
            describe: DataProfiler::describe(ds),
            missing,
            duplicates,
            outliers,
            quality,
            insights,
            suggestions,
        }
    }

    /// Write a report as pretty JSON to `<dir>/<stem>_report.json`.
    pub fn write_report_to_file(report: &QualityReport, dir: &Path, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir).context(format!("Failed to create {}", dir.display()))?;

        let report_path = dir.join(format!("{}_report.json", stem));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Plain-text rendering of a report.
    pub fn render_text(report: &QualityReport) -> String {
        let rule = "-".repeat(40);
        let mut lines = vec![
            "DATA QUALITY REPORT".to_string(),
            format!("Generated: {} UTC", Utc::now().format("%Y-%m-%d %H:%M:%S")),
            "=".repeat(60),
            format!(
                "Quality Score: {} / 100  (Grade: {})",
                format_number(report.quality.score),
                report.quality.grade
            ),
            String::new(),
            "SUMMARY".to_string(),
            rule.clone(),
            format!("  Rows        : {}", report.rows),
            format!("  Columns     : {}", report.columns),
            format!("  Missing vals: {}", report.missing.total_missing),
            format!("  Duplicates  : {}", report.duplicates.duplicate_rows),
            format!("  Outliers    : {}", report.outliers.total_outliers),
            String::new(),
            "INSIGHTS".to_string(),
            rule.clone(),
        ];
        lines.extend(report.insights.iter().map(|insight| format!("  {}", insight)));
        lines.push(String::new());

        if !report.suggestions.is_empty() {
            lines.push("SUGGESTED ACTIONS".to_string());
            lines.push(rule.clone());
            lines.extend(
                report
                    .suggestions
                    .iter()
                    .map(|s| format!("  - {}: {}", s.label, s.reason)),
            );
            lines.push(String::new());
        }

        lines.push("MISSING VALUES PER COLUMN".to_string());
        lines.push(rule);
        lines.extend(report.missing.missing_per_column.iter().map(|(name, entry)| {
            format!("  {}: {} ({}%)", name, entry.count, format_number(entry.pct))
        }));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::integer("id", vec![Some(1), Some(2), Some(2), Some(3)]),
            Column::categorical("name", vec![Some("a"), Some("b"), Some("b"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_summary() {
        let report = ReportGenerator::build_summary(&sample(), &EngineConfig::default());

        assert_eq!(report.rows, 4);
        assert_eq!(report.columns, 2);
        assert_eq!(report.missing.total_missing, 1);
        assert_eq!(report.duplicates.duplicate_rows, 1);
        assert_eq!(report.outliers.total_outliers, 0);
        // 100 - (1/8 * 40 + 1/4 * 30)
        assert_eq!(report.quality.score, 87.5);
        assert_eq!(report.describe["id"].count, 4);
        assert_eq!(report.describe["name"].top.as_deref(), Some("b"));
        assert_eq!(report.data_types["name"].unique, 2);

        let actions: Vec<&str> = report.suggestions.iter().map(|s| s.action.as_str()).collect();
        assert_eq!(actions, vec!["fill_missing", "remove_duplicates", "normalize"]);
    }

    #[test]
    fn test_summary_matches_standalone_insights() {
        let ds = sample();
        let report = ReportGenerator::build_summary(&ds, &EngineConfig::default());
        let engine = InsightEngine::default();

        assert_eq!(report.insights, engine.generate_insights(&ds, &report.quality));
        assert_eq!(report.suggestions, engine.suggested_actions(&ds));
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = std::env::temp_dir().join(format!("quality-engine-report-{}", std::process::id()));
        let report = ReportGenerator::build_summary(&sample(), &EngineConfig::default());

        let path = ReportGenerator::write_report_to_file(&report, &dir, "sample").unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("sample_report.json"));

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["quality"]["grade"], serde_json::json!("B"));
        assert_eq!(written["missing"]["missing_per_column"]["name"]["count"], serde_json::json!(1));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_render_text() {
        let report = ReportGenerator::build_summary(&sample(), &EngineConfig::default());
        let text = ReportGenerator::render_text(&report);

        assert!(text.starts_with("DATA QUALITY REPORT\nGenerated: "));
        assert!(text.contains("Quality Score: 87.5 / 100  (Grade: B)"));
        assert!(text.contains("  Duplicates  : 1\n"));
        assert!(text.contains("  - Fill Missing Values: 1 missing values detected\n"));
        assert!(text.ends_with("  id: 0 (0.0%)\n  name: 1 (25.0%)\n"));
    }
}
