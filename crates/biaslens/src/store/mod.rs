//! Persistence for datasets, analyses and suggestions.
//!
//! Callers go through the [`Repository`] trait. Two backends are provided:
//! [`MemoryRepository`] for tests and one-off runs, and [`JsonRepository`]
//! which keeps everything in one JSON document next to the uploads.
//!
//! ```text
//! .biaslens/
//! ├── biaslens.json            # repository document
//! ├── uploads/datasets/        # uploaded files
//! └── generated_reports/       # rendered PDFs
//! ```

mod json;
mod memory;
mod records;
mod repository;
mod uploads;

pub use json::JsonRepository;
pub use memory::MemoryRepository;
pub use records::{Analysis, Dataset, NewAnalysis, NewDataset, SuggestionFilter};
pub use repository::{LastIds, Repository, StoreDocument, STORE_VERSION};
pub use uploads::{sanitize_file_name, UploadStore};
