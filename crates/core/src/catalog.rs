//! Character and fusion-mode catalog.
//!
//! A [`Catalog`] is an explicitly constructed, immutable value. The server
//! builds one at startup (usually from the embedded [`BUILTIN_CATALOG_JSON`])
//! and shares it behind an `Arc`; tests build smaller ones directly.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::recommendation::{RecommendationTable, StaleIds};
use crate::types::Credits;

/// Canonical catalog shipped with the binary.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../resources/catalog.json");

/// Prompt fragment used when a character carries no generation prompt.
pub const FALLBACK_CHARACTER_PROMPT: &str = "anime character";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Display grouping for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterCategory {
    Popular,
    LegendarySpecial,
    Classic,
    Modern,
}

impl CharacterCategory {
    pub const ALL: [CharacterCategory; 4] = [
        Self::Popular,
        Self::LegendarySpecial,
        Self::Classic,
        Self::Modern,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::LegendarySpecial => "legendary-special",
            Self::Classic => "classic",
            Self::Modern => "modern",
        }
    }
}

impl fmt::Display for CharacterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown character category '{s}'. Must be one of: popular, legendary-special, classic, modern"
                ))
            })
    }
}

/// Character rarity. Ordered from most to least common.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown rarity '{s}'. Must be one of: common, rare, epic, legendary"
                ))
            })
    }
}

/// How demanding a fusion mode is. Display and time estimates only; never
/// affects pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: CharacterCategory,
    pub rarity: Rarity,
    pub is_premium: bool,
    pub credit_cost: Credits,
    /// Prompt fragment describing the character to the generation gateway.
    #[serde(default, skip_serializing)]
    pub generation_prompt: String,
}

impl Character {
    /// The gateway prompt fragment, or [`FALLBACK_CHARACTER_PROMPT`].
    pub fn prompt_fragment(&self) -> &str {
        let trimmed = self.generation_prompt.trim();
        if trimmed.is_empty() {
            FALLBACK_CHARACTER_PROMPT
        } else {
            trimmed
        }
    }
}

/// Per-mode parameters forwarded to the generation gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeSettings {
    /// Image-to-image strength in `0.0..=1.0`.
    pub strength: f64,
    pub guidance_scale: f64,
    pub negative_prompt: String,
    /// Whether an uploaded image is sent along as an image-to-image input.
    pub accepts_image: bool,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            strength: 0.7,
            guidance_scale: 7.5,
            negative_prompt: "blurry, low quality, distorted faces, multiple people overlapping"
                .to_string(),
            accepts_image: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionMode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub credit_cost: Credits,
    pub is_premium: bool,
    #[serde(default)]
    pub settings: ModeSettings,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// On-disk / embedded catalog layout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    characters: Vec<Character>,
    fusion_modes: Vec<FusionMode>,
    #[serde(default)]
    recommendations: IndexMap<String, Vec<String>>,
}

/// Immutable set of characters and fusion modes, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    characters: IndexMap<String, Character>,
    fusion_modes: IndexMap<String, FusionMode>,
    recommendations: RecommendationTable,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// The recommendation table starts empty; attach one with
    /// [`Catalog::with_recommendations`].
    pub fn new(
        characters: Vec<Character>,
        fusion_modes: Vec<FusionMode>,
    ) -> Result<Self, CoreError> {
        let mut by_id = IndexMap::with_capacity(characters.len());
        for character in characters {
            validate_id("Character", &character.id)?;
            if by_id.contains_key(&character.id) {
                return Err(CoreError::Validation(format!(
                    "Duplicate character id '{}'",
                    character.id
                )));
            }
            by_id.insert(character.id.clone(), character);
        }

        let mut modes = IndexMap::with_capacity(fusion_modes.len());
        for mode in fusion_modes {
            validate_id("Fusion mode", &mode.id)?;
            if modes.contains_key(&mode.id) {
                return Err(CoreError::Validation(format!(
                    "Duplicate fusion mode id '{}'",
                    mode.id
                )));
            }
            if !(0.0..=1.0).contains(&mode.settings.strength) {
                return Err(CoreError::Validation(format!(
                    "Fusion mode '{}' strength must be within 0.0..=1.0",
                    mode.id
                )));
            }
            modes.insert(mode.id.clone(), mode);
        }

        Ok(Self {
            characters: by_id,
            fusion_modes: modes,
            recommendations: RecommendationTable::default(),
        })
    }

    /// Attach a recommendation table, checking it against this catalog.
    pub fn with_recommendations(
        mut self,
        table: RecommendationTable,
        stale_ids: StaleIds,
    ) -> Result<Self, CoreError> {
        table.check_against(&self, stale_ids)?;
        self.recommendations = table;
        Ok(self)
    }

    /// Parse a catalog document. Stale recommendation ids are rejected.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let doc: CatalogDocument = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid catalog document: {e}")))?;
        Self::new(doc.characters, doc.fusion_modes)?.with_recommendations(
            RecommendationTable::new(doc.recommendations),
            StaleIds::Reject,
        )
    }

    /// The canonical catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    pub fn get_character(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn get_fusion_mode(&self, id: &str) -> Option<&FusionMode> {
        self.fusion_modes.get(id)
    }

    pub fn all_characters(&self) -> impl ExactSizeIterator<Item = &Character> {
        self.characters.values()
    }

    pub fn all_fusion_modes(&self) -> impl ExactSizeIterator<Item = &FusionMode> {
        self.fusion_modes.values()
    }

    pub fn characters_by_category(&self, category: CharacterCategory) -> Vec<&Character> {
        self.characters
            .values()
            .filter(|c| c.category == category)
            .collect()
    }

    pub fn characters_by_rarity(&self, rarity: Rarity) -> Vec<&Character> {
        self.characters
            .values()
            .filter(|c| c.rarity == rarity)
            .collect()
    }

    pub fn recommendations(&self) -> &RecommendationTable {
        &self.recommendations
    }

    /// Editorial picks for a fusion mode, in catalog order.
    ///
    /// Ids missing from the catalog are skipped; an unknown mode yields an
    /// empty list.
    pub fn recommended_characters(&self, fusion_mode_id: &str) -> Vec<&Character> {
        let Some(ids) = self.recommendations.get(fusion_mode_id) else {
            return Vec::new();
        };
        self.characters
            .values()
            .filter(|c| ids.iter().any(|id| id == &c.id))
            .collect()
    }

    /// Short description of what a fusion will look like, for immediate UI
    /// feedback. `None` if either id is unknown.
    pub fn generate_preview(&self, character_id: &str, fusion_mode_id: &str) -> Option<String> {
        let character = self.get_character(character_id)?;
        let mode = self.get_fusion_mode(fusion_mode_id)?;
        Some(format!("Preview: {} with {} effect", character.name, mode.name))
    }
}

fn validate_id(entity: &str, id: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::Validation(format!("{entity} id must not be empty")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
