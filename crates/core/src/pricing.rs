//! Credit pricing for fusion requests.
//!
//! Pure functions over the [`Catalog`]. Nothing here reads a clock, touches
//! a balance, or performs I/O.

use serde::Serialize;

use crate::catalog::{Catalog, Character, FusionMode};
use crate::error::CoreError;
use crate::types::Credits;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Flat discount applied when either the character or the mode is premium.
pub const PREMIUM_DISCOUNT: Credits = 1;

/// A discounted price never drops below this.
pub const MIN_DISCOUNTED_COST: Credits = 1;

// ---------------------------------------------------------------------------
// Quote type
// ---------------------------------------------------------------------------

/// Itemised price for one (character, mode) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostQuote {
    pub character_id: String,
    pub fusion_mode_id: String,
    /// Character cost plus mode cost.
    pub base_cost: Credits,
    /// How much the premium rule actually took off (0 when not premium).
    pub premium_discount: Credits,
    /// What the fusion costs.
    pub credits: Credits,
    /// Set by [`CostQuote::against_balance`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_afford: Option<bool>,
}

impl CostQuote {
    /// Annotate the quote with whether `user_credits` covers it.
    pub fn against_balance(mut self, user_credits: Credits) -> Self {
        self.can_afford = Some(user_credits >= self.credits);
        self
    }
}

// ---------------------------------------------------------------------------
// Pricing rule
// ---------------------------------------------------------------------------

/// Price a resolved pair.
///
/// `c + m`, or `max(1, c + m - 1)` when either side is premium.
pub fn price(character: &Character, mode: &FusionMode) -> CostQuote {
    let base_cost = character.credit_cost.saturating_add(mode.credit_cost);
    let credits = if character.is_premium || mode.is_premium {
        base_cost
            .saturating_sub(PREMIUM_DISCOUNT)
            .max(MIN_DISCOUNTED_COST)
    } else {
        base_cost
    };

    CostQuote {
        character_id: character.id.clone(),
        fusion_mode_id: mode.id.clone(),
        base_cost,
        premium_discount: base_cost.saturating_sub(credits),
        credits,
        can_afford: None,
    }
}

impl Catalog {
    /// Credit cost of a fusion.
    ///
    /// Returns 0 when either id is unknown. Callers that need to tell an
    /// unknown id apart from a free fusion should use [`Catalog::quote`].
    pub fn calculate_credit_cost(&self, character_id: &str, fusion_mode_id: &str) -> Credits {
        match (
            self.get_character(character_id),
            self.get_fusion_mode(fusion_mode_id),
        ) {
            (Some(character), Some(mode)) => price(character, mode).credits,
            _ => 0,
        }
    }

    /// Itemised quote, failing with [`CoreError::NotFound`] on unknown ids.
    pub fn quote(&self, character_id: &str, fusion_mode_id: &str) -> Result<CostQuote, CoreError> {
        let character = self
            .get_character(character_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Character",
                id: character_id.to_string(),
            })?;
        let mode = self
            .get_fusion_mode(fusion_mode_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "FusionMode",
                id: fusion_mode_id.to_string(),
            })?;
        Ok(price(character, mode))
    }

    /// `user_credits >= calculate_credit_cost(..)`.
    ///
    /// Unknown ids price at 0 and therefore always pass.
    pub fn can_afford(
        &self,
        user_credits: Credits,
        character_id: &str,
        fusion_mode_id: &str,
    ) -> bool {
        user_credits >= self.calculate_credit_cost(character_id, fusion_mode_id)
    }

    /// Strict affordability check. Returns the price on success.
    pub fn ensure_affordable(
        &self,
        user_credits: Credits,
        character_id: &str,
        fusion_mode_id: &str,
    ) -> Result<Credits, CoreError> {
        let required = self.quote(character_id, fusion_mode_id)?.credits;
        if user_credits < required {
            return Err(CoreError::InsufficientCredits {
                required,
                available: user_credits,
            });
        }
        Ok(required)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
