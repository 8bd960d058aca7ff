//! Schema validation and metric computation for one dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BiasLensError, Result};
use crate::input::DataTable;

use super::fairness::{accuracy, equal_opportunity_difference, true_positive_rates, GroupRate};
use super::labels::map_labels;

/// Column holding the true outcome.
pub const TARGET_COLUMN: &str = "target";

/// Column holding the model's prediction.
pub const PREDICTED_COLUMN: &str = "predicted";

/// Metrics computed for a dataset and sensitive feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricReport {
    /// Normalized name of the sensitive column.
    pub sensitive_column: String,
    /// Rows evaluated.
    pub row_count: usize,
    /// Accuracy percentage (0-100).
    pub accuracy: f64,
    /// Equal opportunity difference across sensitive groups.
    pub bias_score: f64,
    /// TPR breakdown per group.
    pub group_rates: IndexMap<String, GroupRate>,
}

/// Validates a table and computes accuracy and the fairness gap.
#[derive(Debug, Clone, Default)]
pub struct MetricEngine;

impl MetricEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `table` against `sensitive_feature`.
    ///
    /// Checks run in order: label columns present, sensitive column present,
    /// every label inside the vocabulary. The first failing check is returned.
    pub fn evaluate(&self, table: &DataTable, sensitive_feature: &str) -> Result<MetricReport> {
        let mut table = table.clone();
        table.normalize_headers();

        let missing: Vec<String> = [TARGET_COLUMN, PREDICTED_COLUMN]
            .into_iter()
            .filter(|c| !table.has_column(c))
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(BiasLensError::MissingColumns(missing));
        }

        let sensitive_index = table
            .column_index(sensitive_feature)
            .ok_or_else(|| BiasLensError::UnknownSensitiveFeature(sensitive_feature.to_string()))?;

        let target_index = column_index(&table, TARGET_COLUMN)?;
        let predicted_index = column_index(&table, PREDICTED_COLUMN)?;

        let y_true = map_labels(TARGET_COLUMN, table.column_values(target_index))?;
        let y_pred = map_labels(PREDICTED_COLUMN, table.column_values(predicted_index))?;
        let groups: Vec<&str> = table.column_values(sensitive_index).collect();

        debug!(
            rows = y_true.len(),
            groups = ?groups,
            "Mapped labels for fairness evaluation"
        );

        let group_rates = true_positive_rates(&y_true, &y_pred, &groups);

        Ok(MetricReport {
            sensitive_column: table.headers[sensitive_index].clone(),
            row_count: y_true.len(),
            accuracy: accuracy(&y_true, &y_pred),
            bias_score: equal_opportunity_difference(&group_rates),
            group_rates,
        })
    }
}

fn column_index(table: &DataTable, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| BiasLensError::MissingColumns(vec![name.to_string()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn table(content: &str) -> DataTable {
        Parser::new().parse_bytes(content.as_bytes()).unwrap().0
    }

    #[test]
    fn test_evaluate_accuracy_and_gap() {
        let data = table(
            "Target,Predicted,Gender\n\
             hired,hired,male\n\
             not hired,not hired,female\n\
             hired,not hired,female\n\
             hired,hired,male\n",
        );

        let report = MetricEngine::new().evaluate(&data, "GENDER").unwrap();
        assert_eq!(report.accuracy, 75.0);
        assert_eq!(report.sensitive_column, "gender");
        assert_eq!(report.row_count, 4);
        // male TPR 1.0, female TPR 0.0
        assert_eq!(report.bias_score, 1.0);
    }

    #[test]
    fn test_missing_both_label_columns() {
        let data = table("gender,score\nmale,1\n");
        let err = MetricEngine::new().evaluate(&data, "gender").unwrap_err();
        match err {
            BiasLensError::MissingColumns(cols) => assert_eq!(cols, vec!["target", "predicted"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_sensitive_feature() {
        let data = table("target,predicted,gender\nhired,hired,male\n");
        let err = MetricEngine::new().evaluate(&data, "race").unwrap_err();
        assert_eq!(err.to_string(), "Sensitive feature 'race' not found in dataset.");
    }

    #[test]
    fn test_invalid_predicted_label() {
        let data = table("target,predicted,gender\nhired,1,male\n");
        let err = MetricEngine::new().evaluate(&data, "gender").unwrap_err();
        assert!(matches!(
            err,
            BiasLensError::InvalidLabelValue { ref column, row: 1, .. } if column == "predicted"
        ));
    }
}
