//! Shared response envelope types for API handlers.
//!
//! Catalog, quote and upload responses use a `{ "data": ... }` envelope.
//! Fusion results are returned bare so clients can branch on `success`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
