//! BiasLens: fairness analysis for hiring-model predictions.
//!
//! BiasLens takes a tabular file of model outcomes, checks that it carries the
//! `target` and `predicted` label columns plus a sensitive attribute, and
//! measures how differently the model treats each group.
//!
//! # Core Principles
//!
//! - **Validate first**: Nothing is stored for a dataset that fails validation
//! - **Non-destructive**: Uploaded files are never rewritten
//! - **Traceable**: Every analysis, suggestion and applied fix is recorded
//!
//! # Example
//!
//! ```no_run
//! use biaslens::{BiasLens, BiasLensConfig};
//!
//! let lens = BiasLens::open(BiasLensConfig::default()).unwrap();
//! let dataset = lens.upload_path("hiring.csv").unwrap();
//! let analysis = lens.analyze(dataset.id, "gender").unwrap();
//!
//! println!("Accuracy: {:.2}%", analysis.accuracy);
//! println!("Bias score: {:.4}", analysis.bias_score);
//! ```

pub mod error;
pub mod input;
pub mod metrics;
pub mod report;
pub mod store;
pub mod suggestion;

mod biaslens;

pub use crate::biaslens::{BiasLens, BiasLensConfig, DEFAULT_DATA_DIR};
pub use error::{BiasLensError, ErrorKind, Result};
pub use input::{DataTable, SourceMetadata};
pub use metrics::{GroupProportions, MetricEngine, MetricReport};
pub use report::{BiasReport, ReportDocument, SuggestionOutcome};
pub use store::{Analysis, Dataset, Repository};
pub use suggestion::{Suggestion, SuggestionCategory, SuggestionThresholds};
