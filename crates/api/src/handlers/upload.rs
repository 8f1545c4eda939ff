//! Handlers for source image uploads.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fusion_core::error::UploadError;
use fusion_core::upload::{
    UploadedImage, FILE_TOO_LARGE_MESSAGE, MAX_UPLOAD_BYTES, SUPPORTED_FORMAT_NAMES,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
    pub file_name: String,
    pub file_size: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadLimits {
    pub max_size_bytes: usize,
    pub supported_formats: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// POST /uploads
// ---------------------------------------------------------------------------

/// Accept a multipart form with a required `file` field, validate it, and
/// hand it to the configured [`UploadStore`](fusion_core::upload::UploadStore).
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        file = Some((file_name, content_type, data.to_vec()));
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("No file provided".into()))?;

    let image = UploadedImage::new(file_name, content_type, data)?;
    let file_name = image.file_name.clone();
    let file_size = image.size();

    let image_url = state.uploads.store(image).await?;

    tracing::info!(
        store = state.uploads.name(),
        file_name = %file_name,
        file_size,
        "Upload accepted",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResponse {
                image_url,
                file_name,
                file_size,
            },
        }),
    ))
}

/// Bodies cut off by the route's body limit get the same size error as files
/// caught by [`UploadedImage::new`].
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return UploadError::Rejected(FILE_TOO_LARGE_MESSAGE.to_string()).into();
    }
    AppError::BadRequest(err.to_string())
}

// ---------------------------------------------------------------------------
// GET /uploads
// ---------------------------------------------------------------------------

/// Report the limits enforced by [`upload_image`].
pub async fn upload_limits() -> Json<DataResponse<UploadLimits>> {
    Json(DataResponse {
        data: UploadLimits {
            max_size_bytes: MAX_UPLOAD_BYTES,
            supported_formats: SUPPORTED_FORMAT_NAMES,
        },
    })
}
