#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use fusion_core::catalog::Catalog;
use fusion_core::error::{GatewayError, UploadError};
use fusion_core::fusion::FusionEngine;
use fusion_core::gateway::{GatewayRequest, GatewayResponse, GenerationGateway};
use fusion_core::upload::{UploadStore, UploadedImage};
use fusion_falai::config::FalConfig;
use http_body_util::BodyExt;
use tower::ServiceExt;

use fusion_api::config::ServerConfig;
use fusion_api::router::build_app_router;
use fusion_api::state::AppState;

pub const GENERATED_URL: &str = "https://cdn.test/generated.png";
pub const MULTIPART_BOUNDARY: &str = "fusion-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        public_base_url: "http://localhost:3000".to_string(),
        upload_dir: PathBuf::from("./target/test-uploads"),
        fal: FalConfig::default(),
    }
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Gateway answering every call with a fixed outcome and counting calls.
pub struct StubGateway {
    outcome: Result<GatewayResponse, GatewayError>,
    pub calls: AtomicUsize,
    pub last: Mutex<Option<GatewayRequest>>,
}

impl StubGateway {
    /// Succeeds with [`GENERATED_URL`], charging the quote it was sent.
    pub fn succeeding() -> Arc<Self> {
        Self::with_outcome(Ok(GatewayResponse {
            image_url: GENERATED_URL.to_string(),
            credits_used: 0,
        }))
    }

    pub fn failing(err: GatewayError) -> Arc<Self> {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<GatewayResponse, GatewayError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationGateway for StubGateway {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, request: GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let quoted = request.quoted_credits;
        *self.last.lock().unwrap() = Some(request);
        self.outcome.clone().map(|mut response| {
            response.credits_used = quoted;
            response
        })
    }
}

/// Upload store keeping files in memory.
#[derive(Default)]
pub struct MemoryUploadStore {
    pub stored: Mutex<Vec<UploadedImage>>,
    pub fail_with: Option<String>,
}

impl MemoryUploadStore {
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            stored: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        })
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn store(&self, image: UploadedImage) -> Result<String, UploadError> {
        if let Some(message) = &self.fail_with {
            return Err(UploadError::Storage(message.clone()));
        }
        let mut stored = self.stored.lock().unwrap();
        let url = format!("https://uploads.test/{}.{}", stored.len(), image.extension());
        stored.push(image);
        Ok(url)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with the built-in catalog and the given
/// backends, using the same middleware stack as `main.rs`.
pub fn build_test_app(
    gateway: Arc<dyn GenerationGateway>,
    uploads: Arc<dyn UploadStore>,
) -> Router {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let state = AppState {
        engine: FusionEngine::new(catalog, gateway),
        uploads,
    };
    build_app_router(state, &test_config())
}

/// App with a succeeding gateway and an in-memory upload store.
pub fn default_app() -> Router {
    build_test_app(StubGateway::succeeding(), Arc::new(MemoryUploadStore::default()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a single-field multipart form.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    field_name: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    app.oneshot(
        Request::post(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
