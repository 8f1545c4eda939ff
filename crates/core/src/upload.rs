//! Image upload constraints and the upload-store seam.
//!
//! Uploads are limited to 10 MiB of JPEG, PNG, or WebP. The declared
//! content type must agree with what the bytes actually are.

use async_trait::async_trait;
use image::ImageFormat;

use crate::error::UploadError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted content types. `image/jpg` is non-standard but browsers send it.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Message for any upload above [`MAX_UPLOAD_BYTES`].
pub const FILE_TOO_LARGE_MESSAGE: &str = "File too large. Maximum size is 10MB.";

/// Human-readable format names for the upload info endpoint.
pub const SUPPORTED_FORMAT_NAMES: &[&str] = &["JPEG", "PNG", "WebP"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An image received from a client, already validated.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Validate and wrap raw upload data.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadError> {
        let content_type = content_type.into().trim().to_ascii_lowercase();
        validate_upload(&content_type, &bytes)?;
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    /// File extension matching the content type.
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Anything that can persist an image and hand back a stable URL for it.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &str;

    async fn store(&self, image: UploadedImage) -> Result<String, UploadError>;
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check content type, size, and that the bytes match the declared type.
pub fn validate_upload(content_type: &str, bytes: &[u8]) -> Result<(), UploadError> {
    let declared = declared_format(content_type).ok_or_else(|| {
        UploadError::Rejected(
            "Invalid file type. Please upload JPEG, PNG, or WebP images.".to_string(),
        )
    })?;

    if bytes.is_empty() {
        return Err(UploadError::Rejected("Uploaded file is empty.".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::Rejected(FILE_TOO_LARGE_MESSAGE.to_string()));
    }

    match image::guess_format(bytes) {
        Ok(actual) if actual == declared => Ok(()),
        Ok(actual) => Err(UploadError::Rejected(format!(
            "File content is {actual:?} but was declared as {content_type}."
        ))),
        Err(_) => Err(UploadError::Rejected(
            "File content is not a recognised image.".to_string(),
        )),
    }
}

fn declared_format(content_type: &str) -> Option<ImageFormat> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
        "image/png" => Some(ImageFormat::Png),
        "image/webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
