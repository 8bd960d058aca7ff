//! In-memory repository.

use std::sync::RwLock;

use crate::error::Result;
use crate::suggestion::{NewSuggestion, Suggestion};

use super::records::{Analysis, Dataset, NewAnalysis, NewDataset, SuggestionFilter};
use super::repository::{poisoned, Repository, StoreDocument};

/// Repository that keeps everything in memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    doc: RwLock<StoreDocument>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn create_dataset(&self, new: NewDataset) -> Result<Dataset> {
        Ok(self.doc.write().map_err(poisoned)?.insert_dataset(new))
    }

    fn get_dataset(&self, id: u64) -> Result<Option<Dataset>> {
        Ok(self.doc.read().map_err(poisoned)?.dataset(id).cloned())
    }

    fn list_datasets(&self) -> Result<Vec<Dataset>> {
        Ok(self.doc.read().map_err(poisoned)?.datasets.clone())
    }

    fn create_analysis(&self, new: NewAnalysis) -> Result<Analysis> {
        self.doc.write().map_err(poisoned)?.insert_analysis(new)
    }

    fn get_analysis(&self, id: u64) -> Result<Option<Analysis>> {
        Ok(self.doc.read().map_err(poisoned)?.analysis(id).cloned())
    }

    fn create_suggestion(&self, new: NewSuggestion) -> Result<Suggestion> {
        self.doc.write().map_err(poisoned)?.insert_suggestion(new)
    }

    fn filter_suggestions(&self, filter: SuggestionFilter) -> Result<Vec<Suggestion>> {
        Ok(self.doc.read().map_err(poisoned)?.filter_suggestions(filter))
    }

    fn mark_applied(&self, analysis_id: u64) -> Result<usize> {
        Ok(self.doc.write().map_err(poisoned)?.mark_applied(analysis_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::SuggestionCategory;

    #[test]
    fn test_round_trip_through_trait() {
        let repo: Box<dyn Repository> = Box::new(MemoryRepository::new());

        let dataset = repo
            .create_dataset(NewDataset {
                file: "d.csv".into(),
                file_name: "d.csv".into(),
                hash: "sha256:ab".into(),
            })
            .unwrap();
        let analysis = repo
            .create_analysis(NewAnalysis {
                dataset_id: dataset.id,
                sensitive_feature: "Gender".into(),
                accuracy: 50.0,
                bias_score: 0.25,
            })
            .unwrap();
        repo.create_suggestion(NewSuggestion::new(
            analysis.id,
            SuggestionCategory::Feature,
            "Remove Gender column from training data.",
        ))
        .unwrap();

        assert!(repo.get_dataset(dataset.id).unwrap().unwrap().processed);
        assert_eq!(repo.get_analysis(analysis.id).unwrap(), Some(analysis.clone()));
        assert_eq!(repo.get_analysis(99).unwrap(), None);
        assert_eq!(repo.mark_applied(analysis.id).unwrap(), 1);
        assert_eq!(
            repo.filter_suggestions(SuggestionFilter::applied(analysis.id))
                .unwrap()
                .len(),
            1
        );
    }
}
