//! Application state for the web server.

use std::sync::Arc;

use biaslens::BiasLens;

use super::error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The analysis service. Its repository synchronizes internally.
    pub lens: Arc<BiasLens>,
}

impl AppState {
    /// Create new application state.
    pub fn new(lens: Arc<BiasLens>) -> Self {
        Self { lens }
    }

    /// Run a service call on the blocking pool.
    ///
    /// Parsing, PDF rendering and repository saves all touch the disk, so
    /// they stay off the async workers.
    pub async fn run_blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&BiasLens) -> biaslens::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let lens = Arc::clone(&self.lens);
        Ok(tokio::task::spawn_blocking(move || f(&lens)).await??)
    }
}
