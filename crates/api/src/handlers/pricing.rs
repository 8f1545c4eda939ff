//! Handler for pricing a character + fusion mode pair.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use fusion_core::pricing::CostQuote;
use fusion_core::types::Credits;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /quotes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub character_id: String,
    #[serde(default)]
    pub fusion_mode_id: String,
    /// When present, the quote reports whether this balance covers it.
    pub user_credits: Option<Credits>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: CostQuote,
    pub preview: String,
}

// ---------------------------------------------------------------------------
// POST /quotes
// ---------------------------------------------------------------------------

/// Price a pair. Unknown ids are a 404, unlike the lenient zero-cost lookup
/// used by `calculate_credit_cost`.
pub async fn create_quote(
    State(state): State<AppState>,
    AppJson(body): AppJson<QuoteRequest>,
) -> AppResult<impl IntoResponse> {
    if body.character_id.trim().is_empty() || body.fusion_mode_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "characterId and fusionModeId are required".into(),
        ));
    }

    let catalog = state.catalog();
    let mut quote = catalog.quote(&body.character_id, &body.fusion_mode_id)?;
    if let Some(balance) = body.user_credits {
        quote = quote.against_balance(balance);
    }
    let preview = catalog
        .generate_preview(&body.character_id, &body.fusion_mode_id)
        .unwrap_or_default();

    tracing::debug!(
        character_id = %quote.character_id,
        fusion_mode_id = %quote.fusion_mode_id,
        credits = quote.credits,
        can_afford = ?quote.can_afford,
        "Quote computed",
    );

    Ok(Json(DataResponse {
        data: QuoteResponse { quote, preview },
    }))
}
