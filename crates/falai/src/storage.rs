//! [`UploadStore`] backed by fal.ai storage.

use async_trait::async_trait;
use fusion_core::error::UploadError;
use fusion_core::upload::{UploadStore, UploadedImage};

use crate::api::FalApi;

pub struct FalUploadStore {
    api: FalApi,
}

impl FalUploadStore {
    pub fn new(api: FalApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UploadStore for FalUploadStore {
    fn name(&self) -> &str {
        "fal"
    }

    async fn store(&self, image: UploadedImage) -> Result<String, UploadError> {
        let size = image.size();
        let url = self
            .api
            .upload(image.bytes, &image.content_type, &image.file_name)
            .await
            .map_err(|e| UploadError::Storage(e.to_string()))?;

        tracing::info!(file_name = %image.file_name, size, %url, "Image uploaded to fal.ai storage");
        Ok(url)
    }
}
