//! Rule-based suggestion generation from analysis results.
//!
//! Rules are evaluated independently; an analysis can trigger none, some or
//! all of them.

use serde::{Deserialize, Serialize};

use crate::metrics::GroupProportions;
use crate::store::Analysis;

use super::{NewSuggestion, SuggestionCategory};

/// Advice emitted for a high fairness gap (data side).
pub const REBALANCE_TEXT: &str = "Rebalance dataset: Increase data diversity.";

/// Advice emitted for a high fairness gap (training side).
pub const MITIGATE_TEXT: &str = "Apply bias mitigation techniques in training.";

/// Thresholds that trigger suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestionThresholds {
    /// Fairness gap above which data and model fixes are suggested.
    pub bias_score: f64,
    /// Group share (percent) above which dropping the sensitive column is suggested.
    pub group_share: f64,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            bias_score: 0.5,
            group_share: 70.0,
        }
    }
}

/// Generates suggestions for an analysis using threshold rules.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    thresholds: SuggestionThresholds,
}

impl SuggestionEngine {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom thresholds.
    pub fn with_thresholds(thresholds: SuggestionThresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> SuggestionThresholds {
        self.thresholds
    }

    /// Suggestions for `analysis` given the group proportions of its dataset.
    pub fn generate(
        &self,
        analysis: &Analysis,
        proportions: &GroupProportions,
    ) -> Vec<NewSuggestion> {
        let mut suggestions = Vec::new();

        if analysis.bias_score > self.thresholds.bias_score {
            suggestions.push(NewSuggestion::new(
                analysis.id,
                SuggestionCategory::Data,
                REBALANCE_TEXT,
            ));
            suggestions.push(NewSuggestion::new(
                analysis.id,
                SuggestionCategory::Model,
                MITIGATE_TEXT,
            ));
        }

        if proportions.is_dominated(self.thresholds.group_share) {
            suggestions.push(NewSuggestion::new(
                analysis.id,
                SuggestionCategory::Feature,
                format!(
                    "Remove {} column from training data.",
                    analysis.sensitive_feature
                ),
            ));
        }

        suggestions
    }
}
