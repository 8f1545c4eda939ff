//! Route definitions for source image uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use fusion_core::upload::MAX_UPLOAD_BYTES;

use crate::handlers::upload;
use crate::state::AppState;

/// Allowance on top of the file limit for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Upload routes mounted at `/uploads`.
///
/// ```text
/// GET  /                  -> upload_limits
/// POST /                  -> upload_image
/// ```
///
/// The body limit sits just above [`MAX_UPLOAD_BYTES`] so oversize files
/// reach the handler and get the descriptive size error.
pub fn upload_router() -> Router<AppState> {
    Router::new()
        .route("/", get(upload::upload_limits).post(upload::upload_image))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES + 2 * MULTIPART_OVERHEAD_BYTES,
        ))
}
