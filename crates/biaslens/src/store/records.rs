//! Dataset and analysis records.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded tabular file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique identifier, assigned by the repository.
    pub id: u64,
    /// Where the uploaded bytes are stored.
    pub file: PathBuf,
    /// Name the file was uploaded under.
    pub file_name: String,
    /// SHA-256 of the uploaded contents.
    pub hash: String,
    /// When the upload was recorded.
    pub uploaded_at: DateTime<Utc>,
    /// Set once an analysis of this dataset completes.
    pub processed: bool,
}

/// A dataset that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataset {
    pub file: PathBuf,
    pub file_name: String,
    pub hash: String,
}

/// Stored result of one fairness analysis. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Unique identifier, assigned by the repository.
    pub id: u64,
    /// Dataset the analysis was computed on.
    pub dataset_id: u64,
    /// Sensitive feature as requested by the caller.
    pub sensitive_feature: String,
    /// Accuracy percentage (0-100).
    pub accuracy: f64,
    /// Equal opportunity difference.
    pub bias_score: f64,
    /// When the analysis was stored.
    pub analyzed_at: DateTime<Utc>,
}

/// An analysis that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysis {
    pub dataset_id: u64,
    pub sensitive_feature: String,
    pub accuracy: f64,
    pub bias_score: f64,
}

/// Criteria for listing suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionFilter {
    /// Analysis whose suggestions to list.
    pub analysis_id: u64,
    /// Restrict to applied (`Some(true)`) or pending (`Some(false)`) suggestions.
    pub applied: Option<bool>,
}

impl SuggestionFilter {
    /// Every suggestion of an analysis.
    pub fn for_analysis(analysis_id: u64) -> Self {
        Self {
            analysis_id,
            applied: None,
        }
    }

    /// Only applied suggestions of an analysis.
    pub fn applied(analysis_id: u64) -> Self {
        Self {
            analysis_id,
            applied: Some(true),
        }
    }

    /// Only pending suggestions of an analysis.
    pub fn pending(analysis_id: u64) -> Self {
        Self {
            analysis_id,
            applied: Some(false),
        }
    }

    /// Whether a suggestion satisfies this filter.
    pub fn matches(&self, suggestion: &crate::suggestion::Suggestion) -> bool {
        suggestion.analysis_id == self.analysis_id
            && self.applied.is_none_or(|applied| suggestion.applied == applied)
    }
}
