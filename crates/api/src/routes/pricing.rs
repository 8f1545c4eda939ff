use axum::routing::post;
use axum::Router;

use crate::handlers::pricing;
use crate::state::AppState;

/// Quote routes mounted at `/quotes`.
///
/// ```text
/// POST /                  -> create_quote
/// ```
pub fn quote_router() -> Router<AppState> {
    Router::new().route("/", post(pricing::create_quote))
}
