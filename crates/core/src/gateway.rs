//! The generation-gateway seam.
//!
//! A gateway turns a resolved fusion into an image URL. Implementations live
//! outside this crate (see `fusion-falai`); tests use in-memory doubles.

use async_trait::async_trait;

use crate::catalog::{Character, FusionMode};
use crate::error::GatewayError;
use crate::types::Credits;

/// Everything a gateway needs to run one generation.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    /// The user's own prompt text, untouched.
    pub prompt: String,
    pub character: Character,
    pub fusion_mode: FusionMode,
    /// URL of a previously uploaded image.
    pub image_ref: Option<String>,
    pub user_id: Option<String>,
    /// What the catalog says this fusion costs.
    pub quoted_credits: Credits,
}

/// A successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub image_url: String,
    /// Credits the gateway charged. Authoritative over the quote.
    pub credits_used: Credits,
}

#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &str;

    async fn generate(&self, request: GatewayRequest) -> Result<GatewayResponse, GatewayError>;
}
