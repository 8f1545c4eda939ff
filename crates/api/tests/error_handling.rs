//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use fusion_api::error::AppError;
use fusion_core::error::{CoreError, UploadError};
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "FusionMode",
        id: "time-travel".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "FusionMode with id time-travel not found");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("unknown rarity 'mythic'".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "unknown rarity 'mythic'");
}

// ---------------------------------------------------------------------------
// Test: CoreError::InsufficientCredits maps to 402
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insufficient_credits_returns_402() {
    let err = AppError::Core(CoreError::InsufficientCredits {
        required: 4,
        available: 1,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(json["code"], "INSUFFICIENT_CREDITS");
    assert_eq!(
        json["error"],
        "Insufficient credits: 4 required, 1 available"
    );
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("No file provided".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "No file provided");
}

// ---------------------------------------------------------------------------
// Test: upload rejections surface their message; storage failures do not
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_rejection_returns_400() {
    let err = AppError::Upload(UploadError::Rejected("File too large. Maximum size is 10MB.".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_UPLOAD");
    assert_eq!(json["error"], "File too large. Maximum size is 10MB.");
}

#[tokio::test]
async fn upload_storage_error_is_sanitized() {
    let err = AppError::Upload(UploadError::Storage("s3://secret-bucket denied".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Failed to upload file");
}

// ---------------------------------------------------------------------------
// Test: `?` conversions keep the domain error intact
// ---------------------------------------------------------------------------

fn lookup_mode(id: &str) -> Result<(), AppError> {
    Err(CoreError::NotFound {
        entity: "FusionMode",
        id: id.to_string(),
    })?
}

fn store_upload(message: &str) -> Result<(), AppError> {
    Err(UploadError::Rejected(message.to_string()))?
}

#[test]
fn core_errors_convert_into_core_variant() {
    assert_matches!(
        lookup_mode("time-travel"),
        Err(AppError::Core(CoreError::NotFound { entity: "FusionMode", ref id })) if id == "time-travel"
    );
    assert_matches!(
        AppError::from(CoreError::InsufficientCredits { required: 3, available: 0 }),
        AppError::Core(CoreError::InsufficientCredits { required: 3, available: 0 })
    );
}

#[test]
fn upload_errors_convert_into_upload_variant() {
    assert_matches!(
        store_upload("Invalid file type"),
        Err(AppError::Upload(UploadError::Rejected(ref msg))) if msg == "Invalid file type"
    );
    assert_matches!(
        AppError::from(UploadError::Storage("timeout".into())),
        AppError::Upload(UploadError::Storage(_))
    );
}
