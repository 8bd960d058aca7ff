//! Report view and PDF download handlers.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use biaslens::report::report_file_name;
use biaslens::{BiasLensError, BiasReport};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for the report view endpoint.
#[derive(Serialize)]
pub struct BiasReportResponse {
    pub message: String,
    pub data: BiasReport,
}

/// Summary, group shares and bias-level buckets.
pub async fn get_bias_report(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<BiasReportResponse>, ApiError> {
    let data = state
        .run_blocking(move |lens| lens.bias_report(id))
        .await?;

    Ok(Json(BiasReportResponse {
        message: "Report data retrieved".to_string(),
        data,
    }))
}

/// Render the PDF report and send it as an attachment.
pub async fn download_report(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .run_blocking(move |lens| {
            let path = lens.render_report(id)?;
            std::fs::read(&path).map_err(|e| {
                BiasLensError::RenderFailure(format!("{}: {}", path.display(), e))
            })
        })
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report_file_name(id)),
            ),
        ],
        bytes,
    ))
}
