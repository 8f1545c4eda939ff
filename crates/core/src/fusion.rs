//! Fusion orchestration: validate, price, delegate, wrap.
//!
//! [`FusionEngine::process_fusion`] never fails. Every outcome, including a
//! malformed request or a gateway outage, comes back as a [`FusionResult`].
//! The engine does not retry, queue, time out, or deduct credits; the
//! caller owns all of that.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Character, FusionMode};
use crate::gateway::{GatewayRequest, GenerationGateway};
use crate::types::{Credits, Millis};

/// Display name used when an id does not resolve.
pub const UNKNOWN_NAME: &str = "Unknown";

// ---------------------------------------------------------------------------
// Request / result
// ---------------------------------------------------------------------------

/// One generation attempt, as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, alias = "character")]
    pub character_id: String,
    #[serde(default, alias = "fusionMode")]
    pub fusion_mode_id: String,
    /// URL of a previously uploaded image.
    #[serde(default, alias = "imageUrl")]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Why a fusion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request named an unknown character or mode, or had no prompt.
    Validation,
    /// The gateway call failed.
    Gateway,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_image_url: Option<String>,
    /// The uploaded source image, echoed back when one was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image_url: Option<String>,
    pub credits_used: Credits,
    pub processing_time_ms: Millis,
    pub character_name: String,
    pub fusion_mode_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl FusionResult {
    fn failed(
        kind: FailureKind,
        message: String,
        character: Option<&Character>,
        mode: Option<&FusionMode>,
        started: Instant,
    ) -> Self {
        Self {
            success: false,
            image_url: None,
            processed_image_url: None,
            source_image_url: None,
            credits_used: 0,
            processing_time_ms: elapsed_ms(started),
            character_name: character.map_or(UNKNOWN_NAME, |c| c.name.as_str()).to_string(),
            fusion_mode_name: mode.map_or(UNKNOWN_NAME, |m| m.name.as_str()).to_string(),
            error: Some(message),
            failure: Some(kind),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Catalog plus gateway. Cheap to share; holds no mutable state.
#[derive(Clone)]
pub struct FusionEngine {
    catalog: Arc<Catalog>,
    gateway: Arc<dyn GenerationGateway>,
}

impl FusionEngine {
    pub fn new(catalog: Arc<Catalog>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self { catalog, gateway }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn gateway_name(&self) -> &str {
        self.gateway.name()
    }

    /// Run one fusion: validate, price, call the gateway once, wrap.
    pub async fn process_fusion(&self, request: FusionRequest) -> FusionResult {
        let started = Instant::now();

        let character = self.catalog.get_character(&request.character_id);
        let mode = self.catalog.get_fusion_mode(&request.fusion_mode_id);

        let (character, mode) = match validate(&request, character, mode) {
            Ok(resolved) => resolved,
            Err(message) => {
                tracing::warn!(
                    character_id = %request.character_id,
                    fusion_mode_id = %request.fusion_mode_id,
                    error = %message,
                    "Fusion request rejected",
                );
                return FusionResult::failed(
                    FailureKind::Validation,
                    message,
                    character,
                    mode,
                    started,
                );
            }
        };

        let quoted_credits = self
            .catalog
            .calculate_credit_cost(&character.id, &mode.id);

        let gateway_request = GatewayRequest {
            prompt: request.prompt.trim().to_string(),
            character: character.clone(),
            fusion_mode: mode.clone(),
            image_ref: request.image_ref.clone(),
            user_id: request.user_id.clone(),
            quoted_credits,
        };

        match self.gateway.generate(gateway_request).await {
            Ok(response) => {
                let processing_time_ms = elapsed_ms(started);
                if response.credits_used != quoted_credits {
                    tracing::debug!(
                        quoted_credits,
                        charged = response.credits_used,
                        "Gateway charge differs from catalog quote",
                    );
                }
                tracing::info!(
                    gateway = self.gateway.name(),
                    character_id = %character.id,
                    fusion_mode_id = %mode.id,
                    credits_used = response.credits_used,
                    processing_time_ms,
                    "Fusion generated",
                );
                FusionResult {
                    success: true,
                    image_url: Some(response.image_url.clone()),
                    processed_image_url: Some(response.image_url),
                    source_image_url: request.image_ref,
                    credits_used: response.credits_used,
                    processing_time_ms,
                    character_name: character.name.clone(),
                    fusion_mode_name: mode.name.clone(),
                    error: None,
                    failure: None,
                }
            }
            Err(err) => {
                tracing::error!(
                    gateway = self.gateway.name(),
                    character_id = %character.id,
                    fusion_mode_id = %mode.id,
                    error = %err,
                    "Fusion generation failed",
                );
                FusionResult::failed(
                    FailureKind::Gateway,
                    err.to_string(),
                    Some(character),
                    Some(mode),
                    started,
                )
            }
        }
    }
}

fn validate<'a>(
    request: &FusionRequest,
    character: Option<&'a Character>,
    mode: Option<&'a FusionMode>,
) -> Result<(&'a Character, &'a FusionMode), String> {
    if request.character_id.trim().is_empty() || request.fusion_mode_id.trim().is_empty() {
        return Err("Character and fusion mode are required".to_string());
    }
    if request.prompt.trim().is_empty() {
        return Err("Prompt is required".to_string());
    }
    let character =
        character.ok_or_else(|| format!("Unknown character '{}'", request.character_id))?;
    let mode = mode.ok_or_else(|| format!("Unknown fusion mode '{}'", request.fusion_mode_id))?;
    Ok((character, mode))
}

fn elapsed_ms(started: Instant) -> Millis {
    Millis::try_from(started.elapsed().as_millis()).unwrap_or(Millis::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
