pub mod catalog;
pub mod fusion;
pub mod health;
pub mod pricing;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /characters                        list (?category=, ?rarity=)
/// /characters/{id}                   get
///
/// /fusion-modes                      list
/// /fusion-modes/{id}                 get
/// /fusion-modes/{id}/recommended     recommended characters
///
/// /quotes                            price a character + mode pair (POST)
///
/// /uploads                           upload limits (GET), upload image (POST)
///
/// /fusions                           run a fusion (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/characters", catalog::character_router())
        .nest("/fusion-modes", catalog::fusion_mode_router())
        .nest("/quotes", pricing::quote_router())
        .nest("/uploads", upload::upload_router())
        .nest("/fusions", fusion::fusion_router())
}
