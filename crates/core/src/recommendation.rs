//! Editorial fusion-mode -> character recommendations.
//!
//! The table is configuration data: it is loaded alongside the catalog and
//! checked against it once, at load time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CoreError;

/// What to do with recommendation entries that name unknown ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleIds {
    /// Fail the load.
    Reject,
    /// Log a warning and keep going; lookups skip the missing entries.
    Warn,
}

/// Ordered mapping of fusion-mode id to ordered character ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable(IndexMap<String, Vec<String>>);

impl RecommendationTable {
    pub fn new(entries: IndexMap<String, Vec<String>>) -> Self {
        Self(entries)
    }

    pub fn get(&self, fusion_mode_id: &str) -> Option<&[String]> {
        self.0.get(fusion_mode_id).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every id in the table that does not resolve in `catalog`, formatted
    /// as `mode` or `mode -> character`.
    pub fn stale_entries(&self, catalog: &Catalog) -> Vec<String> {
        let mut stale = Vec::new();
        for (mode_id, character_ids) in &self.0 {
            if catalog.get_fusion_mode(mode_id).is_none() {
                stale.push(mode_id.clone());
            }
            for character_id in character_ids {
                if catalog.get_character(character_id).is_none() {
                    stale.push(format!("{mode_id} -> {character_id}"));
                }
            }
        }
        stale
    }

    pub(crate) fn check_against(
        &self,
        catalog: &Catalog,
        policy: StaleIds,
    ) -> Result<(), CoreError> {
        let stale = self.stale_entries(catalog);
        if stale.is_empty() {
            return Ok(());
        }
        match policy {
            StaleIds::Reject => Err(CoreError::Validation(format!(
                "Recommendation table references unknown ids: {}",
                stale.join(", ")
            ))),
            StaleIds::Warn => {
                tracing::warn!(stale = ?stale, "Recommendation table references unknown ids");
                Ok(())
            }
        }
    }
}
