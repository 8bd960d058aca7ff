//! Suggestion and apply-fixes handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use biaslens::report::AnalysisSummary;
use biaslens::Suggestion;
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Summary plus the suggestions of an analysis.
#[derive(Serialize)]
pub struct SuggestionResponse {
    pub message: String,
    pub data: AnalysisSummary,
    pub suggestions: Vec<Suggestion>,
}

/// Response for the apply-fixes endpoint.
#[derive(Serialize)]
pub struct ApplyFixesResponse {
    pub message: String,
    /// Suggestions flipped by this call.
    pub applied: usize,
}

/// Suggestions for an analysis, generated on the first request.
pub async fn get_suggestion(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let outcome = state
        .run_blocking(move |lens| lens.suggestions_for(id))
        .await?;

    Ok(Json(SuggestionResponse {
        message: "Report data retrieved".to_string(),
        data: outcome.summary,
        suggestions: outcome.suggestions,
    }))
}

/// Every stored suggestion of an analysis.
pub async fn list_suggestions(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    Ok(Json(
        state.run_blocking(move |lens| lens.suggestions(id)).await?,
    ))
}

/// Mark every pending suggestion as applied.
pub async fn apply_fixes(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApplyFixesResponse>, ApiError> {
    let applied = state
        .run_blocking(move |lens| lens.apply_fixes(id))
        .await?;

    Ok(Json(ApplyFixesResponse {
        message: "Fixes applied successfully!".to_string(),
        applied,
    }))
}
