//! fal.ai response payloads.
//!
//! Only the fields this service reads are modelled; everything else in the
//! JSON is ignored.

use serde::Deserialize;

/// Response body of a synchronous model run (`POST {api_base}/{model}`).
#[derive(Debug, Clone, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
    /// Seed the model actually used; may differ from the one requested.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunResponse {
    /// URL of the first non-empty image, if any.
    pub fn first_image_url(&self) -> Option<&str> {
        self.images
            .iter()
            .map(|img| img.url.trim())
            .find(|url| !url.is_empty())
    }
}

/// One generated image.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

/// Response of the storage upload initiation call.
#[derive(Debug, Clone, Deserialize)]
pub struct InitiateUploadResponse {
    /// Pre-signed URL the bytes are `PUT` to.
    pub upload_url: String,
    /// Public URL the file is served from once uploaded.
    pub file_url: String,
}
