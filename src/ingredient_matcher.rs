//! # Ingredient Matcher
//!
//! Resolves a recipe ingredient to a price catalog entry.
//!
//! ## Matching policy
//!
//! 1. **ID match**: an ingredient carrying an `ingredientId` that exists in
//!    the catalog resolves to that entry, no fuzzy matching is attempted.
//! 2. **Fuzzy match**: names are lowercased and stripped of every non-letter
//!    character, then compared against each catalog key and display name.
//!    The score of a candidate is the longest common contiguous substring
//!    against its key or any of its names, whichever is longer. Scores below
//!    the minimum match length (4 by default) are discarded, except when the
//!    normalized name equals the normalized key or name exactly. The highest
//!    score wins; on ties the first candidate in catalog order is kept.

use crate::price_catalog::PriceCatalog;
use crate::price_model::PriceCatalogEntry;
use crate::pricing_config::{PricingConfig, MIN_MATCH_LENGTH};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    static ref NON_LETTERS: Regex =
        Regex::new(r"[^\p{L}]+").expect("Non-letter pattern should be valid");
}

/// Lowercase a name and drop everything that is not a letter
///
/// ```rust
/// use recipe_pricing::ingredient_matcher::normalize_name;
///
/// assert_eq!(normalize_name("Black-Pepper (ground)"), "blackpepperground");
/// assert_eq!(normalize_name("Ulei de măsline"), "uleidemăsline");
/// ```
pub fn normalize_name(name: &str) -> String {
    NON_LETTERS.replace_all(&name.to_lowercase(), "").into_owned()
}

/// Length in characters of the longest common contiguous substring
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // previous[j] holds the length of the common suffix ending at a[i-1], b[j-1]
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    let mut longest = 0;

    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb { previous[j] + 1 } else { 0 };
            longest = longest.max(current[j + 1]);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    longest
}

/// A resolved catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogMatch<'a> {
    pub key: &'a str,
    pub entry: &'a PriceCatalogEntry,
    /// Fuzzy score in characters, 0 for ID matches
    pub match_length: usize,
    /// True when resolved through `ingredientId`
    pub by_id: bool,
}

/// Fuzzy and ID-based ingredient resolution
#[derive(Debug, Clone)]
pub struct IngredientMatcher {
    min_match_length: usize,
}

impl Default for IngredientMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientMatcher {
    pub fn new() -> Self {
        Self {
            min_match_length: MIN_MATCH_LENGTH,
        }
    }

    /// Matcher with a custom floor, never below one letter
    pub fn with_min_length(min_match_length: usize) -> Self {
        Self {
            min_match_length: min_match_length.max(1),
        }
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self::with_min_length(config.min_match_length)
    }

    pub fn min_match_length(&self) -> usize {
        self.min_match_length
    }

    /// Resolve an ingredient by ID first, then by fuzzy name matching
    pub fn find_match<'a>(
        &self,
        name: &str,
        ingredient_id: Option<u32>,
        catalog: &'a PriceCatalog,
    ) -> Option<CatalogMatch<'a>> {
        if let Some(id) = ingredient_id {
            if let Some((key, entry)) = catalog.entry_by_id(id) {
                debug!("Matched '{}' to '{}' by id {}", name, key, id);
                return Some(CatalogMatch {
                    key,
                    entry,
                    match_length: 0,
                    by_id: true,
                });
            }
            debug!("Ingredient id {} for '{}' not in catalog, trying name", id, name);
        }

        self.find_by_name(name, catalog)
    }

    /// Best fuzzy candidate for a free-text name
    pub fn find_by_name<'a>(&self, name: &str, catalog: &'a PriceCatalog) -> Option<CatalogMatch<'a>> {
        let normalized = normalize_name(name);
        let mut best: Option<CatalogMatch<'a>> = None;

        for (key, entry) in catalog.all_entries() {
            if let Some(length) = self.score(&normalized, key, entry) {
                // Strictly longer only, so the first of equal candidates wins
                if best.map_or(true, |current| length > current.match_length) {
                    best = Some(CatalogMatch {
                        key,
                        entry,
                        match_length: length,
                        by_id: false,
                    });
                }
            }
        }

        match &best {
            Some(found) => debug!(
                "Matched '{}' to '{}' ({} common letters)",
                name, found.key, found.match_length
            ),
            None => debug!("No catalog match for '{}'", name),
        }
        best
    }

    /// Every candidate reaching the match floor, longest match first
    pub fn all_matches<'a>(&self, name: &str, catalog: &'a PriceCatalog) -> Vec<CatalogMatch<'a>> {
        let normalized = normalize_name(name);
        let mut matches: Vec<CatalogMatch<'a>> = catalog
            .all_entries()
            .filter_map(|(key, entry)| {
                self.score(&normalized, key, entry).map(|length| CatalogMatch {
                    key,
                    entry,
                    match_length: length,
                    by_id: false,
                })
            })
            .collect();

        // Stable sort keeps catalog order among equal lengths
        matches.sort_by(|a, b| b.match_length.cmp(&a.match_length));
        matches
    }

    /// Score of one candidate, `None` when it does not qualify
    fn score(&self, normalized_name: &str, key: &str, entry: &PriceCatalogEntry) -> Option<usize> {
        if normalized_name.is_empty() {
            return None;
        }

        let mut best = 0;
        let mut exact = false;

        for candidate in std::iter::once(key).chain(entry.name.variants()) {
            let candidate = normalize_name(candidate);
            if candidate == normalized_name {
                exact = true;
            }
            best = best.max(longest_common_substring(normalized_name, &candidate));
        }

        trace!(
            "Candidate '{}' for '{}': {} common letters{}",
            key,
            normalized_name,
            best,
            if exact { " (exact)" } else { "" }
        );

        (exact || best >= self.min_match_length).then_some(best)
    }
}
