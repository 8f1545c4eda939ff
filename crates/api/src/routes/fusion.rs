use axum::routing::post;
use axum::Router;

use crate::handlers::fusion;
use crate::state::AppState;

/// Fusion routes mounted at `/fusions`.
///
/// ```text
/// POST /                  -> create_fusion
/// ```
pub fn fusion_router() -> Router<AppState> {
    Router::new().route("/", post(fusion::create_fusion))
}
