//! Route definitions for the character and fusion-mode catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Character routes mounted at `/characters`.
///
/// ```text
/// GET /                   -> list_characters
/// GET /{id}               -> get_character
/// ```
pub fn character_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_characters))
        .route("/{id}", get(catalog::get_character))
}

/// Fusion mode routes mounted at `/fusion-modes`.
///
/// ```text
/// GET /                   -> list_fusion_modes
/// GET /{id}               -> get_fusion_mode
/// GET /{id}/recommended   -> recommended_characters
/// ```
pub fn fusion_mode_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_fusion_modes))
        .route("/{id}", get(catalog::get_fusion_mode))
        .route("/{id}/recommended", get(catalog::recommended_characters))
}
