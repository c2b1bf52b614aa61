//! # Price Catalog
//!
//! Read-only reference table of priced ingredients, keyed by catalog key and
//! optionally by numeric id. Iteration follows the order of the source data,
//! which the fuzzy matcher relies on to break ties.
//!
//! ## Source format
//!
//! ```json
//! {
//!   "ingredients": {
//!     "olive_oil": { "id": 3, "name": "Olive oil", "category": "Pantry",
//!                    "unit_type": "volume", "price_per_1000": 25 },
//!     "egg":       { "name": "Egg", "category": "Proteins",
//!                    "unit_type": "piece", "price_per_piece": 0.8 }
//!   }
//! }
//! ```
//!
//! Every entry is validated on load: the price field selected by its
//! `unit_type` must be present and non-negative, and ids must be unique.

use crate::price_model::{Language, PriceCatalogEntry, PriceCategory};
use crate::pricing_errors::PricingError;
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct CatalogFile {
    ingredients: serde_json::Map<String, serde_json::Value>,
}

/// Immutable ingredient price table
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    entries: Vec<(String, PriceCatalogEntry)>,
    by_key: HashMap<String, usize>,
    by_id: HashMap<u32, usize>,
}

impl PriceCatalog {
    /// Build a catalog from `(key, entry)` pairs, keeping their order
    pub fn from_entries<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, PriceCatalogEntry)>,
    ) -> Result<Self, PricingError> {
        let mut catalog = Self::default();

        for (key, entry) in entries {
            let key = key.into();
            entry.validate(&key)?;

            if catalog.by_key.contains_key(&key) {
                return Err(PricingError::InvalidCatalogEntry(format!("duplicate key {key}")));
            }
            let index = catalog.entries.len();
            if let Some(id) = entry.id {
                if let Some(&other) = catalog.by_id.get(&id) {
                    return Err(PricingError::InvalidCatalogEntry(format!(
                        "{key}: id {id} already used by {}",
                        catalog.entries[other].0
                    )));
                }
                catalog.by_id.insert(id, index);
            }
            catalog.by_key.insert(key.clone(), index);
            catalog.entries.push((key, entry));
        }

        debug!(
            "Built price catalog with {} entries ({} with ids)",
            catalog.entries.len(),
            catalog.by_id.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog from its JSON source
    pub fn from_json_str(json: &str) -> Result<Self, PricingError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(file.ingredients.len());

        for (key, value) in file.ingredients {
            let entry: PriceCatalogEntry = serde_json::from_value(value)
                .map_err(|e| PricingError::CatalogParse(format!("{key}: {e}")))?;
            entries.push((key, entry));
        }

        Self::from_entries(entries)
    }

    /// Load a catalog JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| PricingError::Io(format!("{}: {e}", path.display())))?;
        let catalog = Self::from_json_str(&content)?;
        info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, key: &str) -> Option<&PriceCatalogEntry> {
        self.by_key.get(key).map(|&index| &self.entries[index].1)
    }

    pub fn get_by_id(&self, id: u32) -> Option<&PriceCatalogEntry> {
        self.entry_by_id(id).map(|(_, entry)| entry)
    }

    /// Entry with the given id together with its key
    pub fn entry_by_id(&self, id: u32) -> Option<(&str, &PriceCatalogEntry)> {
        self.by_id
            .get(&id)
            .map(|&index| (self.entries[index].0.as_str(), &self.entries[index].1))
    }

    /// All entries in source order
    pub fn all_entries(&self) -> impl Iterator<Item = (&str, &PriceCatalogEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose key or any name contains `term`, ignoring case.
    /// An empty term returns every entry.
    pub fn search(&self, term: &str) -> Vec<(&str, &PriceCatalogEntry)> {
        let term = term.trim().to_lowercase();
        self.all_entries()
            .filter(|(key, entry)| {
                term.is_empty()
                    || key.to_lowercase().contains(&term)
                    || entry
                        .name
                        .variants()
                        .iter()
                        .any(|name| name.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Search results grouped by category in display order, each group
    /// sorted by the name shown for `language`. Empty groups are left out.
    pub fn grouped_by_category(
        &self,
        term: &str,
        language: Language,
    ) -> Vec<(PriceCategory, Vec<(&str, &PriceCatalogEntry)>)> {
        let found = self.search(term);

        PriceCategory::DISPLAY_ORDER
            .iter()
            .filter_map(|&category| {
                let mut group: Vec<(&str, &PriceCatalogEntry)> = found
                    .iter()
                    .filter(|(_, entry)| entry.category == category)
                    .copied()
                    .collect();
                if group.is_empty() {
                    return None;
                }
                group.sort_by_key(|(_, entry)| entry.name.display(language).to_lowercase());
                Some((category, group))
            })
            .collect()
    }
}
