//! Repository persisted as a single JSON document.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{BiasLensError, Result};
use crate::suggestion::{NewSuggestion, Suggestion};

use super::records::{Analysis, Dataset, NewAnalysis, NewDataset, SuggestionFilter};
use super::repository::{poisoned, Repository, StoreDocument};

/// File-backed repository.
///
/// The whole document is rewritten after every mutation. A mutation is
/// applied to a copy first and only becomes visible once the file is saved.
#[derive(Debug)]
pub struct JsonRepository {
    path: PathBuf,
    doc: RwLock<StoreDocument>,
}

impl JsonRepository {
    /// Open the repository at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let doc = if path.exists() {
            StoreDocument::load(&path)?
        } else {
            StoreDocument::default()
        };

        debug!(
            path = %path.display(),
            datasets = doc.datasets.len(),
            analyses = doc.analyses.len(),
            "Opened JSON repository"
        );

        Ok(Self {
            path,
            doc: RwLock::new(doc),
        })
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut StoreDocument) -> Result<T>) -> Result<T> {
        let mut guard = self.doc.write().map_err(poisoned)?;
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        draft.save(&self.path)?;
        *guard = draft;
        Ok(out)
    }

    fn read<T>(&self, f: impl FnOnce(&StoreDocument) -> T) -> Result<T> {
        let guard = self.doc.read().map_err(poisoned)?;
        Ok(f(&guard))
    }
}

impl Repository for JsonRepository {
    fn create_dataset(&self, new: NewDataset) -> Result<Dataset> {
        self.mutate(|doc| Ok(doc.insert_dataset(new)))
    }

    fn get_dataset(&self, id: u64) -> Result<Option<Dataset>> {
        self.read(|doc| doc.dataset(id).cloned())
    }

    fn list_datasets(&self) -> Result<Vec<Dataset>> {
        self.read(|doc| doc.datasets.clone())
    }

    fn create_analysis(&self, new: NewAnalysis) -> Result<Analysis> {
        self.mutate(|doc| doc.insert_analysis(new))
    }

    fn get_analysis(&self, id: u64) -> Result<Option<Analysis>> {
        self.read(|doc| doc.analysis(id).cloned())
    }

    fn create_suggestion(&self, new: NewSuggestion) -> Result<Suggestion> {
        self.mutate(|doc| doc.insert_suggestion(new))
    }

    fn filter_suggestions(&self, filter: SuggestionFilter) -> Result<Vec<Suggestion>> {
        self.read(|doc| doc.filter_suggestions(filter))
    }

    fn mark_applied(&self, analysis_id: u64) -> Result<usize> {
        // Nothing to write when every suggestion is already applied
        let pending = self.read(|doc| {
            doc.filter_suggestions(SuggestionFilter::pending(analysis_id))
                .len()
        })?;
        if pending == 0 {
            return Ok(0);
        }
        self.mutate(|doc| Ok(doc.mark_applied(analysis_id)))
    }
}

impl StoreDocument {
    /// Save the document to a JSON file, creating parent directories.
    ///
    /// The document is written to a sibling `.tmp` file and renamed over
    /// `path`, so a failed save leaves the previous file in place.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    BiasLensError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let tmp = temp_path(path);
        let result = self.write_file(&tmp).and_then(|()| {
            fs::rename(&tmp, path).map_err(|e| {
                BiasLensError::Persistence(format!(
                    "Failed to replace '{}': {}",
                    path.display(),
                    e
                ))
            })
        });

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|e| {
            BiasLensError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        self.write_json(&mut file)?;
        file.sync_all().map_err(|e| {
            BiasLensError::Persistence(format!("Failed to sync '{}': {}", path.display(), e))
        })
    }

    /// Serialize into `inner` and flush, reporting write errors.
    fn write_json<W: Write>(&self, inner: W) -> Result<()> {
        let mut writer = BufWriter::new(inner);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| {
            BiasLensError::Persistence(format!("Failed to serialize repository: {}", e))
        })?;
        writer.flush().map_err(|e| {
            BiasLensError::Persistence(format!("Failed to write repository: {}", e))
        })
    }

    /// Load a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            BiasLensError::Persistence(format!(
                "Failed to open file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            BiasLensError::Persistence(format!(
                "Failed to parse repository '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// `<path>.tmp`, next to the real file so the rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
