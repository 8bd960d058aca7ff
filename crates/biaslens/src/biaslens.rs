//! Main BiasLens struct and public API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{BiasLensError, Result};
use crate::input::{DataTable, Parser, ParserConfig};
use crate::metrics::{GroupProportions, MetricEngine};
use crate::report::{
    AnalysisSummary, BiasReport, ReportDocument, ReportRenderer, SuggestionOutcome,
};
use crate::store::{
    Analysis, Dataset, JsonRepository, MemoryRepository, NewAnalysis, Repository,
    SuggestionFilter, UploadStore,
};
use crate::suggestion::{Suggestion, SuggestionEngine, SuggestionThresholds};

/// Default root for uploads, reports and the repository file.
pub const DEFAULT_DATA_DIR: &str = ".biaslens";

/// Configuration for BiasLens.
#[derive(Debug, Clone)]
pub struct BiasLensConfig {
    /// Root directory for all persisted state.
    pub data_dir: PathBuf,
    /// Parser configuration for dataset files.
    pub parser: ParserConfig,
    /// Suggestion rule thresholds.
    pub thresholds: SuggestionThresholds,
}

impl Default for BiasLensConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            parser: ParserConfig::default(),
            thresholds: SuggestionThresholds::default(),
        }
    }
}

impl BiasLensConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the parser configuration.
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Set suggestion thresholds.
    pub fn with_thresholds(mut self, thresholds: SuggestionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Where uploaded files are written.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads").join("datasets")
    }

    /// Where PDF reports are written.
    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("generated_reports")
    }

    /// The JSON repository file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("biaslens.json")
    }
}

/// The BiasLens analysis service.
pub struct BiasLens {
    config: BiasLensConfig,
    parser: Parser,
    metrics: MetricEngine,
    suggestions: SuggestionEngine,
    uploads: UploadStore,
    reports: ReportRenderer,
    repo: Arc<dyn Repository>,
}

impl BiasLens {
    /// Open a service persisted under `config.data_dir`.
    pub fn open(config: BiasLensConfig) -> Result<Self> {
        let repo = JsonRepository::open(config.store_path())?;
        Ok(Self::with_repository(config, Arc::new(repo)))
    }

    /// Create a service whose records live only in memory.
    ///
    /// Uploaded files and reports are still written under `config.data_dir`.
    pub fn in_memory(config: BiasLensConfig) -> Self {
        Self::with_repository(config, Arc::new(MemoryRepository::new()))
    }

    /// Create a service on top of any repository.
    pub fn with_repository(config: BiasLensConfig, repo: Arc<dyn Repository>) -> Self {
        Self {
            parser: Parser::with_config(config.parser.clone()),
            metrics: MetricEngine::new(),
            suggestions: SuggestionEngine::with_thresholds(config.thresholds),
            uploads: UploadStore::new(config.uploads_dir()),
            reports: ReportRenderer::new(config.reports_dir()),
            repo,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &BiasLensConfig {
        &self.config
    }

    /// Store an uploaded file and record it as a dataset.
    pub fn upload_dataset(&self, file_name: &str, bytes: &[u8]) -> Result<Dataset> {
        let new = self.uploads.save(file_name, bytes)?;
        let dataset = self.repo.create_dataset(new)?;

        info!(
            dataset_id = dataset.id,
            file = %dataset.file.display(),
            "Dataset uploaded"
        );
        Ok(dataset)
    }

    /// Register a file that is already on disk.
    pub fn upload_path(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| BiasLensError::io(path, e))?;
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.upload_dataset(&file_name, &bytes)
    }

    /// Fetch a dataset.
    pub fn dataset(&self, id: u64) -> Result<Dataset> {
        self.repo
            .get_dataset(id)?
            .ok_or(BiasLensError::DatasetNotFound(id))
    }

    /// All datasets.
    pub fn datasets(&self) -> Result<Vec<Dataset>> {
        self.repo.list_datasets()
    }

    /// Run the metric engine on a dataset and store the result.
    ///
    /// Nothing is stored unless every validation step passes.
    pub fn analyze(&self, dataset_id: u64, sensitive_feature: &str) -> Result<Analysis> {
        let dataset = self.dataset(dataset_id)?;
        let table = self.load_table(&dataset)?;

        let report = self
            .metrics
            .evaluate(&table, sensitive_feature)
            .inspect_err(|e| warn!(dataset_id, error = %e, "Dataset failed validation"))?;

        debug!(
            dataset_id,
            groups = report.group_rates.len(),
            "Computed group true-positive rates"
        );

        let analysis = self.repo.create_analysis(NewAnalysis {
            dataset_id,
            sensitive_feature: sensitive_feature.to_string(),
            accuracy: report.accuracy,
            bias_score: report.bias_score,
        })?;

        info!(
            analysis_id = analysis.id,
            dataset_id,
            accuracy = analysis.accuracy,
            bias_score = analysis.bias_score,
            "Analysis completed"
        );
        Ok(analysis)
    }

    /// Fetch an analysis.
    pub fn analysis(&self, id: u64) -> Result<Analysis> {
        self.repo
            .get_analysis(id)?
            .ok_or(BiasLensError::AnalysisNotFound(id))
    }

    /// Summary, group shares and bias-level buckets of an analysis.
    pub fn bias_report(&self, analysis_id: u64) -> Result<BiasReport> {
        let analysis = self.analysis(analysis_id)?;
        let proportions = self.proportions(&analysis)?;
        Ok(BiasReport::new(&analysis, &proportions))
    }

    /// Run the suggestion rules and store whatever they produce.
    ///
    /// Every call appends new suggestions, even if identical ones exist.
    pub fn generate_suggestions(&self, analysis_id: u64) -> Result<SuggestionOutcome> {
        let analysis = self.analysis(analysis_id)?;
        let proportions = self.proportions(&analysis)?;

        let suggestions = self
            .suggestions
            .generate(&analysis, &proportions)
            .into_iter()
            .map(|new| self.repo.create_suggestion(new))
            .collect::<Result<Vec<_>>>()?;

        info!(
            analysis_id,
            created = suggestions.len(),
            "Generated suggestions"
        );

        Ok(SuggestionOutcome {
            summary: AnalysisSummary::new(&analysis, &proportions),
            suggestions,
            created: true,
        })
    }

    /// Suggestions for an analysis, generating them on first request.
    ///
    /// Later calls return the stored suggestions instead of adding duplicates.
    pub fn suggestions_for(&self, analysis_id: u64) -> Result<SuggestionOutcome> {
        let existing = self.suggestions(analysis_id)?;
        if existing.is_empty() {
            return self.generate_suggestions(analysis_id);
        }

        let analysis = self.analysis(analysis_id)?;
        let proportions = self.proportions(&analysis)?;
        Ok(SuggestionOutcome {
            summary: AnalysisSummary::new(&analysis, &proportions),
            suggestions: existing,
            created: false,
        })
    }

    /// Every stored suggestion of an analysis.
    pub fn suggestions(&self, analysis_id: u64) -> Result<Vec<Suggestion>> {
        self.analysis(analysis_id)?;
        self.repo
            .filter_suggestions(SuggestionFilter::for_analysis(analysis_id))
    }

    /// Mark every pending suggestion of an analysis as applied.
    ///
    /// Idempotent. Unknown ids simply match no suggestions.
    pub fn apply_fixes(&self, analysis_id: u64) -> Result<usize> {
        let applied = self.repo.mark_applied(analysis_id)?;
        info!(analysis_id, applied, "Applied fixes");
        Ok(applied)
    }

    /// Content of the PDF report for an analysis.
    pub fn report_document(&self, analysis_id: u64) -> Result<ReportDocument> {
        let analysis = self.analysis(analysis_id)?;
        let applied = self
            .repo
            .filter_suggestions(SuggestionFilter::applied(analysis_id))?;
        Ok(ReportDocument::new(&analysis, &applied))
    }

    /// Render the PDF report and return where it was written.
    pub fn render_report(&self, analysis_id: u64) -> Result<PathBuf> {
        let doc = self.report_document(analysis_id)?;
        let path = self.reports.write(&doc)?;
        info!(analysis_id, path = %path.display(), "Report rendered");
        Ok(path)
    }

    /// Where the report for an analysis is written.
    pub fn report_path(&self, analysis_id: u64) -> PathBuf {
        self.reports.report_path(analysis_id)
    }

    fn load_table(&self, dataset: &Dataset) -> Result<DataTable> {
        let (table, source) = self.parser.parse_file(&dataset.file)?;
        debug!(
            dataset_id = dataset.id,
            format = %source.format,
            rows = source.row_count,
            columns = source.column_count,
            "Loaded dataset"
        );
        Ok(table)
    }

    fn proportions(&self, analysis: &Analysis) -> Result<GroupProportions> {
        let dataset = self.dataset(analysis.dataset_id)?;
        let table = self.load_table(&dataset)?;
        let values = table
            .column_by_name(&analysis.sensitive_feature)
            .ok_or_else(|| {
                BiasLensError::UnknownSensitiveFeature(analysis.sensitive_feature.clone())
            })?;
        Ok(GroupProportions::compute(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HIRING: &str = "Target,Predicted,Gender\n\
                          hired,hired,male\n\
                          not hired,not hired,male\n\
                          hired,not hired,female\n\
                          hired,hired,male\n";

    fn service(dir: &TempDir) -> BiasLens {
        BiasLens::in_memory(BiasLensConfig::new().with_data_dir(dir.path()))
    }

    #[test]
    fn test_config_paths() {
        let config = BiasLensConfig::new().with_data_dir("/srv/biaslens");
        assert_eq!(config.uploads_dir(), PathBuf::from("/srv/biaslens/uploads/datasets"));
        assert_eq!(config.reports_dir(), PathBuf::from("/srv/biaslens/generated_reports"));
        assert_eq!(config.store_path(), PathBuf::from("/srv/biaslens/biaslens.json"));
    }

    #[test]
    fn test_analyze_marks_dataset_processed() {
        let dir = TempDir::new().unwrap();
        let lens = service(&dir);

        let dataset = lens.upload_dataset("hiring.csv", HIRING.as_bytes()).unwrap();
        let analysis = lens.analyze(dataset.id, "gender").unwrap();

        assert_eq!(analysis.accuracy, 75.0);
        assert_eq!(analysis.bias_score, 1.0);
        assert_eq!(analysis.sensitive_feature, "gender");
        assert!(lens.dataset(dataset.id).unwrap().processed);
    }

    #[test]
    fn test_suggestions_for_does_not_duplicate() {
        let dir = TempDir::new().unwrap();
        let lens = service(&dir);

        let dataset = lens.upload_dataset("hiring.csv", HIRING.as_bytes()).unwrap();
        let analysis = lens.analyze(dataset.id, "gender").unwrap();

        let first = lens.suggestions_for(analysis.id).unwrap();
        assert!(first.created);
        // gap 1.0 and male share 75%
        assert_eq!(first.suggestions.len(), 3);

        let second = lens.suggestions_for(analysis.id).unwrap();
        assert!(!second.created);
        assert_eq!(second.suggestions, first.suggestions);
    }

    #[test]
    fn test_generate_suggestions_appends() {
        let dir = TempDir::new().unwrap();
        let lens = service(&dir);

        let dataset = lens.upload_dataset("hiring.csv", HIRING.as_bytes()).unwrap();
        let analysis = lens.analyze(dataset.id, "gender").unwrap();

        lens.generate_suggestions(analysis.id).unwrap();
        lens.generate_suggestions(analysis.id).unwrap();
        assert_eq!(lens.suggestions(analysis.id).unwrap().len(), 6);
    }

    #[test]
    fn test_report_for_unknown_analysis() {
        let dir = TempDir::new().unwrap();
        let lens = service(&dir);

        assert!(matches!(
            lens.bias_report(42),
            Err(BiasLensError::AnalysisNotFound(42))
        ));
        assert!(matches!(
            lens.render_report(42),
            Err(BiasLensError::AnalysisNotFound(42))
        ));
        assert!(!lens.report_path(42).exists());
    }
}
