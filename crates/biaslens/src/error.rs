//! Error types for the BiasLens library.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of an error, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A dataset or analysis does not exist.
    NotFound,
    /// The request or the dataset contents were rejected.
    Validation,
    /// The report document could not be produced.
    RenderFailure,
    /// Anything else. Details are logged, callers get a generic message.
    Unexpected,
}

/// Main error type for BiasLens operations.
#[derive(Debug, Error)]
pub enum BiasLensError {
    /// No dataset with this id.
    #[error("Dataset not found: {0}")]
    DatasetNotFound(u64),

    /// No analysis with this id.
    #[error("Analysis not found: {0}")]
    AnalysisNotFound(u64),

    /// The dataset file could not be read as tabular data.
    #[error("Malformed file '{path}': {message}")]
    MalformedFile { path: PathBuf, message: String },

    /// Required label columns are absent.
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The requested sensitive feature is not a column of the dataset.
    #[error("Sensitive feature '{0}' not found in dataset.")]
    UnknownSensitiveFeature(String),

    /// A label cell is outside the known vocabulary.
    #[error("Invalid value '{value}' in '{column}' column at row {row}. Expected 'hired' or 'not hired'.")]
    InvalidLabelValue {
        column: String,
        row: usize,
        value: String,
    },

    /// An upload was rejected before it reached the store.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// The PDF report was not produced.
    #[error("The report could not be generated: {0}")]
    RenderFailure(String),

    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Repository failure.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl BiasLensError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BiasLensError::DatasetNotFound(_) | BiasLensError::AnalysisNotFound(_) => {
                ErrorKind::NotFound
            }
            BiasLensError::MalformedFile { .. }
            | BiasLensError::MissingColumns(_)
            | BiasLensError::UnknownSensitiveFeature(_)
            | BiasLensError::InvalidLabelValue { .. }
            | BiasLensError::InvalidUpload(_) => ErrorKind::Validation,
            BiasLensError::RenderFailure(_) => ErrorKind::RenderFailure,
            BiasLensError::Io { .. }
            | BiasLensError::Csv(_)
            | BiasLensError::Json(_)
            | BiasLensError::Persistence(_) => ErrorKind::Unexpected,
        }
    }

    /// Helper for wrapping IO errors with the path involved.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BiasLensError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for BiasLens operations.
pub type Result<T> = std::result::Result<T, BiasLensError>;
