//! Handlers for the read-only catalog endpoints.
//!
//! Characters and fusion modes are served in catalog order.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use fusion_core::catalog::{Character, CharacterCategory, Rarity};
use fusion_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Optional filters for the character list. Both may be combined.
#[derive(Debug, Default, Deserialize)]
pub struct CharacterFilter {
    pub category: Option<String>,
    pub rarity: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /characters
// ---------------------------------------------------------------------------

/// List characters, optionally filtered by category and/or rarity.
///
/// Unknown filter values are rejected with 400 rather than yielding an
/// empty list.
pub async fn list_characters(
    State(state): State<AppState>,
    Query(filter): Query<CharacterFilter>,
) -> AppResult<impl IntoResponse> {
    let category = filter
        .category
        .as_deref()
        .map(str::parse::<CharacterCategory>)
        .transpose()?;
    let rarity = filter
        .rarity
        .as_deref()
        .map(str::parse::<Rarity>)
        .transpose()?;

    let catalog = state.catalog();
    let mut characters: Vec<&Character> = match category {
        Some(category) => catalog.characters_by_category(category),
        None => catalog.all_characters().collect(),
    };
    if let Some(rarity) = rarity {
        characters.retain(|c| c.rarity == rarity);
    }

    let characters: Vec<Character> = characters.into_iter().cloned().collect();
    Ok(Json(DataResponse { data: characters }))
}

// ---------------------------------------------------------------------------
// GET /characters/{id}
// ---------------------------------------------------------------------------

pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let character = state
        .catalog()
        .get_character(&id)
        .cloned()
        .ok_or_else(|| CoreError::NotFound {
            entity: "Character",
            id,
        })?;
    Ok(Json(DataResponse { data: character }))
}

// ---------------------------------------------------------------------------
// GET /fusion-modes
// ---------------------------------------------------------------------------

pub async fn list_fusion_modes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let modes: Vec<_> = state.catalog().all_fusion_modes().cloned().collect();
    Ok(Json(DataResponse { data: modes }))
}

// ---------------------------------------------------------------------------
// GET /fusion-modes/{id}
// ---------------------------------------------------------------------------

pub async fn get_fusion_mode(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mode = state
        .catalog()
        .get_fusion_mode(&id)
        .cloned()
        .ok_or_else(|| CoreError::NotFound {
            entity: "FusionMode",
            id,
        })?;
    Ok(Json(DataResponse { data: mode }))
}

// ---------------------------------------------------------------------------
// GET /fusion-modes/{id}/recommended
// ---------------------------------------------------------------------------

/// Characters editorially recommended for a mode.
///
/// 404 for an unknown mode; a known mode without recommendations yields an
/// empty list.
pub async fn recommended_characters(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog();
    if catalog.get_fusion_mode(&id).is_none() {
        return Err(CoreError::NotFound {
            entity: "FusionMode",
            id,
        }
        .into());
    }
    let characters: Vec<Character> = catalog
        .recommended_characters(&id)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DataResponse { data: characters }))
}
