//! CLI command implementations.

pub mod analyze;
pub mod apply;
pub mod datasets;
pub mod report;
pub mod serve;
pub mod status;
pub mod suggest;
pub mod upload;

use std::path::PathBuf;

use biaslens::{BiasLens, BiasLensConfig};

/// Open the service persisted under `data_dir`.
pub(crate) fn open(data_dir: PathBuf) -> biaslens::Result<BiasLens> {
    BiasLens::open(BiasLensConfig::new().with_data_dir(data_dir))
}
