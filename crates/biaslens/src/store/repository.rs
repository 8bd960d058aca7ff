//! Repository interface and the document shared by its backends.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{BiasLensError, Result};
use crate::suggestion::{NewSuggestion, Suggestion};

use super::records::{Analysis, Dataset, NewAnalysis, NewDataset, SuggestionFilter};

/// Current version of the repository document format.
pub const STORE_VERSION: &str = "1.0.0";

/// Storage for datasets, analyses and suggestions.
///
/// Every method is a single unit of work: it either fully applies or leaves
/// the store untouched.
pub trait Repository: Send + Sync {
    /// Record an uploaded dataset.
    fn create_dataset(&self, new: NewDataset) -> Result<Dataset>;

    /// Fetch a dataset by id.
    fn get_dataset(&self, id: u64) -> Result<Option<Dataset>>;

    /// All datasets in upload order.
    fn list_datasets(&self) -> Result<Vec<Dataset>>;

    /// Store an analysis and flag its dataset as processed.
    ///
    /// Fails with [`BiasLensError::DatasetNotFound`] if the dataset is unknown.
    fn create_analysis(&self, new: NewAnalysis) -> Result<Analysis>;

    /// Fetch an analysis by id.
    fn get_analysis(&self, id: u64) -> Result<Option<Analysis>>;

    /// Append a suggestion.
    ///
    /// Fails with [`BiasLensError::AnalysisNotFound`] if the analysis is unknown.
    fn create_suggestion(&self, new: NewSuggestion) -> Result<Suggestion>;

    /// Suggestions matching `filter`, in creation order.
    fn filter_suggestions(&self, filter: SuggestionFilter) -> Result<Vec<Suggestion>>;

    /// Flag every pending suggestion of an analysis as applied.
    ///
    /// Returns how many suggestions changed.
    fn mark_applied(&self, analysis_id: u64) -> Result<usize>;
}

/// Serialized contents of a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Format version.
    pub version: String,
    /// Last id handed out per table.
    #[serde(default)]
    pub last_ids: LastIds,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub analyses: Vec<Analysis>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Id counters, one per record type.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LastIds {
    pub dataset: u64,
    pub analysis: u64,
    pub suggestion: u64,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            last_ids: LastIds::default(),
            datasets: Vec::new(),
            analyses: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

impl StoreDocument {
    pub(crate) fn insert_dataset(&mut self, new: NewDataset) -> Dataset {
        self.last_ids.dataset += 1;
        let dataset = Dataset {
            id: self.last_ids.dataset,
            file: new.file,
            file_name: new.file_name,
            hash: new.hash,
            uploaded_at: Utc::now(),
            processed: false,
        };
        self.datasets.push(dataset.clone());
        dataset
    }

    pub(crate) fn dataset(&self, id: u64) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    pub(crate) fn analysis(&self, id: u64) -> Option<&Analysis> {
        self.analyses.iter().find(|a| a.id == id)
    }

    pub(crate) fn insert_analysis(&mut self, new: NewAnalysis) -> Result<Analysis> {
        let dataset = self
            .datasets
            .iter_mut()
            .find(|d| d.id == new.dataset_id)
            .ok_or(BiasLensError::DatasetNotFound(new.dataset_id))?;
        dataset.processed = true;

        self.last_ids.analysis += 1;
        let analysis = Analysis {
            id: self.last_ids.analysis,
            dataset_id: new.dataset_id,
            sensitive_feature: new.sensitive_feature,
            accuracy: new.accuracy,
            bias_score: new.bias_score,
            analyzed_at: Utc::now(),
        };
        self.analyses.push(analysis.clone());
        Ok(analysis)
    }

    pub(crate) fn insert_suggestion(&mut self, new: NewSuggestion) -> Result<Suggestion> {
        if self.analysis(new.analysis_id).is_none() {
            return Err(BiasLensError::AnalysisNotFound(new.analysis_id));
        }

        self.last_ids.suggestion += 1;
        let suggestion = new.into_suggestion(self.last_ids.suggestion);
        self.suggestions.push(suggestion.clone());
        Ok(suggestion)
    }

    pub(crate) fn filter_suggestions(&self, filter: SuggestionFilter) -> Vec<Suggestion> {
        self.suggestions
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect()
    }

    pub(crate) fn mark_applied(&mut self, analysis_id: u64) -> usize {
        let filter = SuggestionFilter::pending(analysis_id);
        let mut changed = 0;
        for suggestion in self.suggestions.iter_mut().filter(|s| filter.matches(s)) {
            suggestion.applied = true;
            changed += 1;
        }
        changed
    }
}

pub(crate) fn poisoned<T>(_: T) -> BiasLensError {
    BiasLensError::Persistence("repository lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::SuggestionCategory;

    fn new_dataset() -> NewDataset {
        NewDataset {
            file: "uploads/datasets/a.csv".into(),
            file_name: "a.csv".to_string(),
            hash: "sha256:00".to_string(),
        }
    }

    fn new_analysis(dataset_id: u64) -> NewAnalysis {
        NewAnalysis {
            dataset_id,
            sensitive_feature: "gender".to_string(),
            accuracy: 75.0,
            bias_score: 0.6,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut doc = StoreDocument::default();
        assert_eq!(doc.insert_dataset(new_dataset()).id, 1);
        assert_eq!(doc.insert_dataset(new_dataset()).id, 2);
    }

    #[test]
    fn test_insert_analysis_marks_processed() {
        let mut doc = StoreDocument::default();
        let dataset = doc.insert_dataset(new_dataset());
        assert!(!dataset.processed);

        let analysis = doc.insert_analysis(new_analysis(dataset.id)).unwrap();
        assert_eq!(analysis.dataset_id, dataset.id);
        assert!(doc.dataset(dataset.id).unwrap().processed);
    }

    #[test]
    fn test_insert_analysis_unknown_dataset() {
        let mut doc = StoreDocument::default();
        let err = doc.insert_analysis(new_analysis(9)).unwrap_err();
        assert!(matches!(err, BiasLensError::DatasetNotFound(9)));
        assert!(doc.analyses.is_empty());
    }

    #[test]
    fn test_suggestion_requires_analysis() {
        let mut doc = StoreDocument::default();
        let err = doc
            .insert_suggestion(NewSuggestion::new(1, SuggestionCategory::Data, "x"))
            .unwrap_err();
        assert!(matches!(err, BiasLensError::AnalysisNotFound(1)));
    }

    #[test]
    fn test_mark_applied_only_touches_one_analysis() {
        let mut doc = StoreDocument::default();
        let dataset = doc.insert_dataset(new_dataset());
        let first = doc.insert_analysis(new_analysis(dataset.id)).unwrap();
        let second = doc.insert_analysis(new_analysis(dataset.id)).unwrap();

        for id in [first.id, first.id, second.id] {
            doc.insert_suggestion(NewSuggestion::new(id, SuggestionCategory::Model, "fix"))
                .unwrap();
        }

        assert_eq!(doc.mark_applied(first.id), 2);
        assert_eq!(doc.mark_applied(first.id), 0);
        assert_eq!(doc.filter_suggestions(SuggestionFilter::pending(second.id)).len(), 1);
        assert_eq!(doc.filter_suggestions(SuggestionFilter::applied(first.id)).len(), 2);
    }
}
