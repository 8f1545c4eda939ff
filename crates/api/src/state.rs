use std::sync::Arc;

use fusion_core::catalog::Catalog;
use fusion_core::fusion::FusionEngine;
use fusion_core::upload::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog plus generation gateway.
    pub engine: FusionEngine,
    /// Where uploaded source images are persisted.
    pub uploads: Arc<dyn UploadStore>,
}

impl AppState {
    pub fn catalog(&self) -> &Catalog {
        self.engine.catalog()
    }
}
