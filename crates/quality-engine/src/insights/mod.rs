//! Human-readable insights and suggested next steps.
//!
//! Both lists have a fixed order. Each entry is added only when its trigger
//! holds, so a clean dataset gets a verdict and nothing else.

use crate::config::EngineConfig;
use crate::dataset::{Column, Dataset};
use crate::profiler::DataProfiler;
use crate::types::{DuplicateReport, MissingnessReport, OutlierReport, QualityScore, Suggestion};

/// The profiler output insights are derived from.
#[derive(Debug, Clone, Copy)]
pub struct ProfileView<'a> {
    pub missing: &'a MissingnessReport,
    pub duplicates: &'a DuplicateReport,
    pub outliers: &'a OutlierReport,
    pub numeric_columns: &'a [&'a str],
}

/// Turns profiler reports into sentences and cleaning suggestions.
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: EngineConfig,
}

impl InsightEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Insights for a dataset and its already computed quality score.
    pub fn generate_insights(&self, ds: &Dataset, quality: &QualityScore) -> Vec<String> {
        let missing = DataProfiler::detect_missing(ds);
        let duplicates = DataProfiler::detect_duplicates(ds);
        let outliers = DataProfiler::detect_outliers(ds);
        let numeric: Vec<&str> = ds.numeric_columns().map(Column::name).collect();

        self.insights_from(
            ProfileView {
                missing: &missing,
                duplicates: &duplicates,
                outliers: &outliers,
                numeric_columns: &numeric,
            },
            quality,
        )
    }

    /// Suggested cleaning actions for a dataset.
    pub fn suggested_actions(&self, ds: &Dataset) -> Vec<Suggestion> {
        let missing = DataProfiler::detect_missing(ds);
        let duplicates = DataProfiler::detect_duplicates(ds);
        let outliers = DataProfiler::detect_outliers(ds);
        let numeric: Vec<&str> = ds.numeric_columns().map(Column::name).collect();

        Self::suggestions_from(ProfileView {
            missing: &missing,
            duplicates: &duplicates,
            outliers: &outliers,
            numeric_columns: &numeric,
        })
    }

    /// Insights from reports that were computed elsewhere.
    pub fn insights_from(&self, view: ProfileView<'_>, quality: &QualityScore) -> Vec<String> {
        let mut insights = Vec::new();

        let verdict = if quality.score >= 90.0 {
            "✅ Your dataset is in excellent shape with minimal issues detected."
        } else if quality.score >= 75.0 {
            "🟡 Your dataset is good but has some areas that can be improved."
        } else {
            "🔴 Your dataset has significant quality issues that should be addressed."
        };
        insights.push(verdict.to_string());

        if view.missing.total_missing > 0
            && let Some((column, count)) = view.missing.worst_column()
        {
            insights.push(format!(
                "📉 {} missing values detected. '{}' has the most gaps ({} missing).",
                view.missing.total_missing, column, count
            ));
        }

        if view.duplicates.duplicate_rows > 0 {
            insights.push(format!(
                "🔁 {} duplicate rows found — removing them will improve model accuracy.",
                view.duplicates.duplicate_rows
            ));
        }

        if view.outliers.total_outliers > 0
            && let Some((column, _)) = view.outliers.worst_column()
        {
            insights.push(format!(
                "📊 {} outliers detected. '{}' has the most extreme values.",
                view.outliers.total_outliers, column
            ));
        }

        if !view.numeric_columns.is_empty() {
            let limit = self.config.insight_column_names;
            let shown = view.numeric_columns[..view.numeric_columns.len().min(limit)].join(", ");
            let more = if view.numeric_columns.len() > limit { "..." } else { "" };
            insights.push(format!(
                "🔢 {} numeric column(s) found: {}{}. Consider normalizing for ML pipelines.",
                view.numeric_columns.len(),
                shown,
                more
            ));
        }

        insights
    }

    /// Suggestions from reports that were computed elsewhere.
    pub fn suggestions_from(view: ProfileView<'_>) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        if view.missing.total_missing > 0 {
            suggestions.push(suggestion(
                "fill_missing",
                "Fill Missing Values",
                format!("{} missing values detected", view.missing.total_missing),
            ));
        }
        if view.duplicates.duplicate_rows > 0 {
            suggestions.push(suggestion(
                "remove_duplicates",
                "Remove Duplicates",
                format!("{} duplicate rows found", view.duplicates.duplicate_rows),
            ));
        }
        if view.outliers.total_outliers > 0 {
            suggestions.push(suggestion(
                "remove_outliers",
                "Remove Outliers",
                format!("{} outliers detected", view.outliers.total_outliers),
            ));
        }
        if !view.numeric_columns.is_empty() {
            suggestions.push(suggestion(
                "normalize",
                "Normalize Data",
                "Numeric columns benefit from normalization for ML".to_string(),
            ));
        }

        suggestions
    }
}

fn suggestion(action: &str, label: &str, reason: String) -> Suggestion {
    Suggestion {
        action: action.to_string(),
        label: label.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn messy() -> Dataset {
        Dataset::new(vec![
            Column::numeric(
                "age",
                vec![Some(11.0), Some(12.0), None, Some(13.0), Some(1000.0), Some(12.0), Some(12.0)],
            ),
            Column::categorical(
                "city",
                vec![Some("Oslo"), None, None, Some("Rome"), Some("Oslo"), Some("Lima"), Some("Lima")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_insights_order_and_text() {
        let ds = messy();
        let quality = DataProfiler::compute_quality_score(&ds);
        let insights = InsightEngine::default().generate_insights(&ds, &quality);

        assert_eq!(
            insights,
            vec![
                "🟡 Your dataset is good but has some areas that can be improved.".to_string(),
                "📉 3 missing values detected. 'city' has the most gaps (2 missing).".to_string(),
                "🔁 1 duplicate rows found — removing them will improve model accuracy.".to_string(),
                "📊 1 outliers detected. 'age' has the most extreme values.".to_string(),
                "🔢 1 numeric column(s) found: age. Consider normalizing for ML pipelines.".to_string(),
            ]
        );
    }

    #[test]
    fn test_clean_dataset_gets_verdict_only() {
        let ds = Dataset::new(vec![Column::categorical("c", vec![Some("a"), Some("b")])]).unwrap();
        let quality = DataProfiler::compute_quality_score(&ds);
        let insights = InsightEngine::default().generate_insights(&ds, &quality);

        assert_eq!(
            insights,
            vec!["✅ Your dataset is in excellent shape with minimal issues detected.".to_string()]
        );
        assert!(InsightEngine::default().suggested_actions(&ds).is_empty());
    }

    #[test]
    fn test_low_score_verdict() {
        let ds = Dataset::empty();
        let quality = DataProfiler::compute_quality_score(&ds);
        let insights = InsightEngine::default().generate_insights(&ds, &quality);
        assert_eq!(
            insights,
            vec!["🔴 Your dataset has significant quality issues that should be addressed.".to_string()]
        );
    }

    #[test]
    fn test_numeric_names_truncated() {
        let columns = (0..7)
            .map(|i| Column::numeric(format!("n{i}"), vec![Some(1.0)]))
            .collect();
        let ds = Dataset::new(columns).unwrap();
        let quality = DataProfiler::compute_quality_score(&ds);

        let insights = InsightEngine::default().generate_insights(&ds, &quality);
        assert_eq!(
            insights.last().unwrap(),
            "🔢 7 numeric column(s) found: n0, n1, n2, n3, n4.... Consider normalizing for ML pipelines."
        );

        let config = EngineConfig::builder().insight_column_names(7).build().unwrap();
        let insights = InsightEngine::new(config).generate_insights(&ds, &quality);
        assert!(insights.last().unwrap().contains("n6. Consider"));
    }

    #[test]
    fn test_suggested_actions_order() {
        let actions = InsightEngine::default().suggested_actions(&messy());
        let ids: Vec<&str> = actions.iter().map(|s| s.action.as_str()).collect();

        assert_eq!(
            ids,
            vec!["fill_missing", "remove_duplicates", "remove_outliers", "normalize"]
        );
        assert_eq!(
            actions[0],
            Suggestion {
                action: "fill_missing".to_string(),
                label: "Fill Missing Values".to_string(),
                reason: "3 missing values detected".to_string(),
            }
        );
    }
}
