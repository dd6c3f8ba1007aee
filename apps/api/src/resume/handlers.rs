//! Axum route handlers for the Résumé Parser API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::extract::extract_text;
use crate::resume::ingest::read_upload;
use crate::resume::models::ResumeData;
use crate::state::AppState;

/// POST /api/resume/parse
///
/// Accepts a PDF, DOCX or plain-text résumé in the multipart field `file`
/// and returns the structured fields found in it.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResumeData>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::Validation(format!("Expected a multipart upload: {}", e.body_text())))?;
    let parse_id = Uuid::new_v4();
    let document = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    info!(
        %parse_id,
        "Parsing résumé '{}' ({:?}, {} bytes, {})",
        document.file_name,
        document.format,
        document.bytes.len(),
        document.content_type
    );

    let text = extract_text(&document).await?;
    let data = state.extractor.extract(&text).await?;

    info!(
        %parse_id,
        "Parsed résumé via {} extractor: {} skills, {} positions, {} degrees",
        state.extractor.backend(),
        data.skills.len(),
        data.experience.len(),
        data.education.len()
    );
    Ok(Json(data))
}
