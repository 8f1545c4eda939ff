//! Handler for running a fusion.
//!
//! The engine never errors; its [`FusionResult`] is returned as-is and the
//! HTTP status reflects how it ended:
//!
//! | Outcome                        | Status |
//! |--------------------------------|--------|
//! | success                        | 200    |
//! | unknown character / mode       | 422    |
//! | gateway failure                | 502    |
//!
//! Malformed bodies, missing fields, and an insufficient `userCredits`
//! balance are rejected before the engine runs (400 / 402).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fusion_core::fusion::{FailureKind, FusionRequest, FusionResult};
use fusion_core::types::Credits;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Body of `POST /fusions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFusion {
    #[serde(flatten)]
    pub request: FusionRequest,
    /// Caller's balance. Checked against the quote but never debited here.
    pub user_credits: Option<Credits>,
}

// ---------------------------------------------------------------------------
// POST /fusions
// ---------------------------------------------------------------------------

pub async fn create_fusion(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateFusion>,
) -> AppResult<impl IntoResponse> {
    let CreateFusion {
        request,
        user_credits,
    } = body;

    if request.character_id.trim().is_empty() || request.fusion_mode_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Character and fusion mode are required".into(),
        ));
    }
    if request.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("Prompt is required".into()));
    }

    if let Some(balance) = user_credits {
        let catalog = state.catalog();
        let known = catalog.get_character(&request.character_id).is_some()
            && catalog.get_fusion_mode(&request.fusion_mode_id).is_some();
        if known {
            catalog.ensure_affordable(balance, &request.character_id, &request.fusion_mode_id)?;
        }
    }

    tracing::info!(
        character_id = %request.character_id,
        fusion_mode_id = %request.fusion_mode_id,
        has_image = request.image_ref.is_some(),
        user_id = ?request.user_id,
        "Fusion requested",
    );

    let result = state.engine.process_fusion(request).await;
    Ok((status_for(&result), Json(result)))
}

fn status_for(result: &FusionResult) -> StatusCode {
    match result.failure {
        None => StatusCode::OK,
        Some(FailureKind::Validation) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(FailureKind::Gateway) => StatusCode::BAD_GATEWAY,
    }
}
