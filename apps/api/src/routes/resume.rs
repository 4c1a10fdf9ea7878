//! Axum route handlers for the Resume API.
//!
//! These handlers are transport only: they decode the multipart form, persist the
//! uploaded photo and hand a `ResumeInput` to the render pipeline.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ResumeContent, ResumeInput};
use crate::state::AppState;

pub const DATA_FIELD: &str = "data";
pub const PHOTO_FIELD: &str = "photo";
const DOWNLOAD_FILE_NAME: &str = "resume.pdf";

struct UploadedPhoto {
    file_name: Option<String>,
    bytes: Bytes,
}

struct GenerateForm {
    content: ResumeContent,
    photo: UploadedPhoto,
}

/// GET /resume
pub async fn handle_hello() -> &'static str {
    "Hello from resume-api"
}

/// POST /resume/generate
///
/// Multipart form with a JSON `data` part and an image `photo` part.
/// Responds with the compiled PDF as an attachment.
pub async fn handle_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    info!("Received request to generate PDF");

    let form = read_form(&mut multipart).await?;
    let photo = persist_photo(state.config.work_root.clone(), form.photo).await?;
    info!(photo = %photo.path().display(), "Uploaded photo saved");

    let input = ResumeInput::new(form.content, photo.path());
    let result = state.pipeline.generate(&input).await;
    remove_photo(photo);

    let pdf = result?;
    info!(bytes = pdf.len(), "PDF generated successfully");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

async fn read_form(multipart: &mut Multipart) -> Result<GenerateForm, AppError> {
    let mut content: Option<ResumeContent> = None;
    let mut photo: Option<UploadedPhoto> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            DATA_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable '{DATA_FIELD}' part: {e}")))?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::Validation(format!("Invalid resume data: {e}")))?;
                content = Some(parsed);
            }
            PHOTO_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable '{PHOTO_FIELD}' part: {e}")))?;
                photo = Some(UploadedPhoto { file_name, bytes });
            }
            _ => {}
        }
    }

    let content = content
        .ok_or_else(|| AppError::Validation(format!("Missing '{DATA_FIELD}' part")))?;
    let photo = photo.ok_or_else(|| AppError::Validation(format!("Missing '{PHOTO_FIELD}' part")))?;
    if photo.bytes.is_empty() {
        return Err(AppError::Validation(format!("'{PHOTO_FIELD}' part is empty")));
    }

    Ok(GenerateForm { content, photo })
}

/// Writes the upload to `photo-<uuid>XXXXXX<.ext>` under `root`.
/// The returned handle deletes the file when dropped.
async fn persist_photo(root: PathBuf, photo: UploadedPhoto) -> Result<NamedTempFile, AppError> {
    let suffix = photo_suffix(photo.file_name.as_deref());

    let file = tokio::task::spawn_blocking(move || -> anyhow::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix(&format!("photo-{}", Uuid::new_v4()))
            .suffix(&suffix)
            .tempfile_in(&root)
            .with_context(|| format!("Failed to create photo file in {}", root.display()))?;
        file.write_all(&photo.bytes)
            .context("Failed to write uploaded photo")?;
        file.flush().context("Failed to flush uploaded photo")?;
        Ok(file)
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking failed while saving photo: {e}"))??;

    Ok(file)
}

/// Keeps the uploaded file's extension so the compiler can detect the image
/// format. Only plain alphanumeric extensions are kept.
fn photo_suffix(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

fn remove_photo(photo: NamedTempFile) {
    let path = photo.path().to_path_buf();
    match photo.close() {
        Ok(()) => info!(photo = %path.display(), "Cleaned up temporary photo"),
        Err(e) => warn!(photo = %path.display(), "Failed to delete temporary photo: {e}"),
    }
}
