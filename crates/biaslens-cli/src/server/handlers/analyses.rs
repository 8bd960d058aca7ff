//! Analysis handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use biaslens::Analysis;
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request to analyze a dataset.
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub dataset_id: u64,
    pub sensitive_feature: String,
}

/// Response for a completed analysis.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub message: String,
    pub analysis_id: u64,
    pub accuracy: f64,
    pub bias_score: f64,
}

/// Run the metric engine and store the analysis.
pub async fn analyze_dataset(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let analysis = state
        .run_blocking(move |lens| lens.analyze(req.dataset_id, &req.sensitive_feature))
        .await?;

    Ok(Json(AnalyzeResponse {
        message: "Analysis completed successfully!".to_string(),
        analysis_id: analysis.id,
        accuracy: analysis.accuracy,
        bias_score: analysis.bias_score,
    }))
}

/// Get a stored analysis.
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Analysis>, ApiError> {
    Ok(Json(state.run_blocking(move |lens| lens.analysis(id)).await?))
}
