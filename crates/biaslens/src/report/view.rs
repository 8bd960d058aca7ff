//! JSON-friendly summaries of a stored analysis.

use serde::{Deserialize, Serialize};

use crate::metrics::GroupProportions;
use crate::store::Analysis;
use crate::suggestion::Suggestion;

/// Accuracy, fairness gap and group shares of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub accuracy: f64,
    pub bias_score: f64,
    pub male_percentage: f64,
    pub female_percentage: f64,
}

impl AnalysisSummary {
    pub fn new(analysis: &Analysis, proportions: &GroupProportions) -> Self {
        Self {
            accuracy: analysis.accuracy,
            bias_score: analysis.bias_score,
            male_percentage: proportions.male_percentage,
            female_percentage: proportions.female_percentage,
        }
    }
}

/// One bucket of the bias-level chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasLevel {
    pub name: String,
    pub size: i64,
}

impl BiasLevel {
    fn new(name: &str, size: f64) -> Self {
        Self {
            name: name.to_string(),
            size: size.round() as i64,
        }
    }
}

/// The three chart buckets, scaled from the fairness gap.
pub fn bias_levels(bias_score: f64) -> Vec<BiasLevel> {
    vec![
        BiasLevel::new("Highly Biased", bias_score * 500.0),
        BiasLevel::new("Moderate Bias", (1.0 - bias_score) * 300.0),
        BiasLevel::new("Low Bias", (1.0 - bias_score) * 150.0),
    ]
}

/// Report view of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    #[serde(flatten)]
    pub summary: AnalysisSummary,
    pub heatmap_data: Vec<BiasLevel>,
}

impl BiasReport {
    pub fn new(analysis: &Analysis, proportions: &GroupProportions) -> Self {
        Self {
            summary: AnalysisSummary::new(analysis, proportions),
            heatmap_data: bias_levels(analysis.bias_score),
        }
    }
}

/// Result of fetching suggestions for an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionOutcome {
    pub summary: AnalysisSummary,
    pub suggestions: Vec<Suggestion>,
    /// Whether `suggestions` were generated by this call.
    pub created: bool,
}
