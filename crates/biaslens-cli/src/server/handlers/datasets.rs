//! Dataset upload handler.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart field carrying the dataset file.
const FILE_FIELD: &str = "file";

/// Response for a stored upload.
#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub dataset_id: u64,
}

/// Store the `file` field of a multipart upload as a new dataset.
pub async fn upload_dataset(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        let dataset = state
            .run_blocking(move |lens| lens.upload_dataset(&file_name, &bytes))
            .await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                message: "File uploaded successfully!".to_string(),
                dataset_id: dataset.id,
            }),
        ));
    }

    Err(ApiError::BadRequest(format!(
        "No '{}' field in the upload.",
        FILE_FIELD
    )))
}
