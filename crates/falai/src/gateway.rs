//! [`GenerationGateway`] backed by fal.ai FLUX models.

use async_trait::async_trait;
use fusion_core::error::GatewayError;
use fusion_core::gateway::{GatewayRequest, GatewayResponse, GenerationGateway};
use fusion_core::prompt::build_prompt;
use rand::Rng;
use serde_json::{json, Value};

use crate::api::{FalApi, FalApiError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Model used when a source image is supplied.
pub const IMAGE_TO_IMAGE_MODEL: &str = "fal-ai/flux-pro/v1.1-ultra";

/// Model used for prompt-only generations.
pub const TEXT_TO_IMAGE_MODEL: &str = "fal-ai/flux-pro/v1.1";

pub const NUM_INFERENCE_STEPS: u32 = 28;

/// 1024x1024.
pub const IMAGE_SIZE: &str = "square_hd";

/// Seeds are drawn from `0..MAX_SEED`.
pub const MAX_SEED: u32 = 1_000_000;

// ---------------------------------------------------------------------------
// Payload construction
// ---------------------------------------------------------------------------

/// Pick the model for a request.
pub fn select_model(request: &GatewayRequest) -> &'static str {
    if request.image_ref.is_some() {
        IMAGE_TO_IMAGE_MODEL
    } else {
        TEXT_TO_IMAGE_MODEL
    }
}

/// Build the model input for a request.
///
/// The source image and strength are only sent for modes that accept an
/// image.
pub fn build_input(request: &GatewayRequest, seed: u32) -> Value {
    let settings = &request.fusion_mode.settings;
    let mut input = json!({
        "prompt": build_prompt(&request.prompt, &request.character),
        "negative_prompt": settings.negative_prompt,
        "guidance_scale": settings.guidance_scale,
        "num_inference_steps": NUM_INFERENCE_STEPS,
        "seed": seed,
        "image_size": IMAGE_SIZE,
    });

    if let (Some(image_url), true) = (&request.image_ref, settings.accepts_image) {
        if let Some(obj) = input.as_object_mut() {
            obj.insert("image_url".to_string(), json!(image_url));
            obj.insert("strength".to_string(), json!(settings.strength));
        }
    }

    input
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Runs fusions on fal.ai and charges the catalog quote.
pub struct FalGateway {
    api: FalApi,
}

impl FalGateway {
    pub fn new(api: FalApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl GenerationGateway for FalGateway {
    fn name(&self) -> &str {
        "fal"
    }

    async fn generate(&self, request: GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        let model_id = select_model(&request);
        let seed = rand::rng().random_range(0..MAX_SEED);
        let input = build_input(&request, seed);

        tracing::debug!(
            model_id,
            seed,
            character_id = %request.character.id,
            fusion_mode_id = %request.fusion_mode.id,
            has_image = request.image_ref.is_some(),
            "Submitting fal.ai generation",
        );

        let output = self.api.run(model_id, &input).await.map_err(gateway_error)?;
        let image_url = output
            .first_image_url()
            .ok_or_else(|| GatewayError::Rejected("No image generated".to_string()))?
            .to_string();

        tracing::debug!(
            model_id,
            seed = ?output.seed,
            image_count = output.images.len(),
            "fal.ai generation finished",
        );

        Ok(GatewayResponse {
            image_url,
            credits_used: request.quoted_credits,
        })
    }
}

/// Map a REST-layer failure onto the gateway taxonomy.
pub fn gateway_error(err: FalApiError) -> GatewayError {
    match err {
        FalApiError::Request(e) if e.is_decode() => GatewayError::MalformedResponse(e.to_string()),
        FalApiError::Request(e) => GatewayError::Transport(e.to_string()),
        api @ FalApiError::ApiError { .. } => GatewayError::Rejected(api.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
