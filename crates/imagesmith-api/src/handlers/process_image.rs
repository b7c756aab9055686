use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use imagesmith_core::{AppError, TransformSettings};

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_process_image_form;

/// `POST /process-image`
///
/// Multipart form with an `image` file and a `settings` JSON text field.
/// Responds with the transformed image as PNG.
#[tracing::instrument(skip(state, multipart))]
pub async fn process_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let form = extract_process_image_form(multipart?).await?;

    let image = form.image.ok_or(AppError::NoImageProvided)?;
    state
        .validator
        .validate_filename(&image.filename)
        .map_err(|e| {
            tracing::debug!(filename = %image.filename, error = %e, "Rejected upload");
            AppError::InvalidFileType
        })?;

    let raw_settings = form
        .settings
        .filter(|s| !s.is_empty())
        .ok_or(AppError::NoSettingsProvided)?;

    state.validator.validate_size(image.data.len())?;
    let settings = TransformSettings::from_json(&raw_settings)?;

    tracing::info!(
        filename = %image.filename,
        size = image.data.len(),
        settings = ?settings,
        "Processing image"
    );

    let pipeline = state.pipeline.clone();
    let data = image.data;
    let png = tokio::task::spawn_blocking(move || pipeline.process(&data, &settings))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to spawn blocking task");
            AppError::Internal(e.to_string())
        })??;

    tracing::debug!(output_size = png.len(), "Image processed");

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response())
}
