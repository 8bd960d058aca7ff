//! Suggestion records for remediating a biased analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of remediation a suggestion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    /// Change the training data.
    Data,
    /// Change how the model is trained.
    Model,
    /// Change the feature set.
    Feature,
}

impl SuggestionCategory {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionCategory::Data => "Data Fix",
            SuggestionCategory::Model => "Model Fix",
            SuggestionCategory::Feature => "Feature Fix",
        }
    }

    /// Serialized tag (`data`, `model`, `feature`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionCategory::Data => "data",
            SuggestionCategory::Model => "model",
            SuggestionCategory::Feature => "feature",
        }
    }
}

/// A stored remediation suggestion.
///
/// Suggestions are append-only; `applied` is the only field that changes
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Unique identifier, assigned by the repository.
    pub id: u64,

    /// Analysis this suggestion belongs to.
    pub analysis_id: u64,

    /// Human-readable advice.
    #[serde(rename = "suggestion_text")]
    pub text: String,

    /// Remediation category.
    pub category: SuggestionCategory,

    /// Whether the fix has been applied.
    pub applied: bool,

    /// When this suggestion was generated.
    pub created_at: DateTime<Utc>,
}

/// A suggestion that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSuggestion {
    pub analysis_id: u64,
    pub category: SuggestionCategory,
    pub text: String,
}

impl NewSuggestion {
    /// Create a new unsaved suggestion.
    pub fn new(analysis_id: u64, category: SuggestionCategory, text: impl Into<String>) -> Self {
        Self {
            analysis_id,
            category,
            text: text.into(),
        }
    }

    /// Turn into a stored record with the given id.
    pub(crate) fn into_suggestion(self, id: u64) -> Suggestion {
        Suggestion {
            id,
            analysis_id: self.analysis_id,
            text: self.text,
            category: self.category,
            applied: false,
            created_at: Utc::now(),
        }
    }
}
