//! Placement of uploaded dataset files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BiasLensError, Result};
use crate::input::content_hash;

use super::records::NewDataset;

/// Characters allowed in stored file names; everything else becomes `_`.
static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid regex"));

/// Writes uploaded files into a directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Store uploads under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The upload directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` and describe the resulting dataset.
    ///
    /// The stored name is `<first 12 hash chars>_<sanitized name>`, so
    /// uploading identical contents under the same name reuses one file.
    pub fn save(&self, file_name: &str, bytes: &[u8]) -> Result<NewDataset> {
        if bytes.is_empty() {
            return Err(BiasLensError::InvalidUpload(
                "The submitted file is empty.".to_string(),
            ));
        }

        let safe_name = sanitize_file_name(file_name).ok_or_else(|| {
            BiasLensError::InvalidUpload(format!("Unusable file name '{}'.", file_name))
        })?;

        let hash = content_hash(bytes);
        let digest = hash.trim_start_matches("sha256:");
        let stored = self
            .dir
            .join(format!("{}_{}", &digest[..12], safe_name));

        fs::create_dir_all(&self.dir).map_err(|e| BiasLensError::io(&self.dir, e))?;
        fs::write(&stored, bytes).map_err(|e| BiasLensError::io(&stored, e))?;

        Ok(NewDataset {
            file: stored,
            file_name: file_name.to_string(),
            hash,
        })
    }
}

/// Reduce an uploaded name to a safe final path component.
///
/// Returns `None` when nothing usable remains.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = UNSAFE_CHARS.replace_all(base.trim(), "_");
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
