//! Local-disk [`UploadStore`] for development.
//!
//! Files are written under the configured upload directory with a random
//! UUID name and served back by `ServeDir` at `/uploads/{name}`.

use std::path::PathBuf;

use async_trait::async_trait;
use fusion_core::error::UploadError;
use fusion_core::upload::{UploadStore, UploadedImage};
use uuid::Uuid;

/// URL path prefix the upload directory is served under.
pub const UPLOADS_PATH: &str = "/uploads";

pub struct LocalUploadStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalUploadStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn store(&self, image: UploadedImage) -> Result<String, UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| UploadError::Storage(format!("create {}: {e}", self.dir.display())))?;

        let name = format!("{}.{}", Uuid::new_v4(), image.extension());
        let path = self.dir.join(&name);
        let size = image.size();

        tokio::fs::write(&path, image.bytes)
            .await
            .map_err(|e| UploadError::Storage(format!("write {}: {e}", path.display())))?;

        let url = format!("{}{UPLOADS_PATH}/{name}", self.public_base_url);
        tracing::info!(
            file_name = %image.file_name,
            size,
            path = %path.display(),
            "Image stored locally",
        );
        Ok(url)
    }
}
