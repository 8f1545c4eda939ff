//! Offline gateway for local development.
//!
//! Used when no fal.ai key is configured. Returns a random placeholder image
//! after a short simulated delay so the UI's pending state is exercised.

use std::time::Duration;

use async_trait::async_trait;
use fusion_core::error::GatewayError;
use fusion_core::gateway::{GatewayRequest, GatewayResponse, GenerationGateway};
use rand::Rng;

/// Default simulated generation time.
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_secs(2);

pub struct DevGateway {
    simulated_latency: Duration,
}

impl Default for DevGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_LATENCY)
    }
}

impl DevGateway {
    pub fn new(simulated_latency: Duration) -> Self {
        Self { simulated_latency }
    }
}

/// Placeholder image URL for a given variant number.
pub fn placeholder_url(variant: u32) -> String {
    format!("https://picsum.photos/1024/1024?random={variant}")
}

#[async_trait]
impl GenerationGateway for DevGateway {
    fn name(&self) -> &str {
        "dev"
    }

    async fn generate(&self, request: GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        let variant = rand::rng().random_range(0..1000);
        tracing::debug!(
            character_id = %request.character.id,
            fusion_mode_id = %request.fusion_mode.id,
            variant,
            "Development gateway returning placeholder image",
        );

        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }

        Ok(GatewayResponse {
            image_url: placeholder_url(variant),
            credits_used: request.quoted_credits,
        })
    }
}
