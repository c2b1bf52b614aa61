//! # Cost Calculator
//!
//! Combines the [ingredient matcher](crate::ingredient_matcher) and the
//! [unit normalizer](crate::unit_normalizer) to price ingredients and whole
//! recipes against an injected [`PriceCatalog`].
//!
//! Data-quality gaps never fail a calculation: an ingredient with no catalog
//! match, or whose unit cannot be converted for the matched entry, is priced
//! with the flat fallback cost (0.2 per serving by default) and flagged
//! `matched: false`. An ingredient with no name in the requested language
//! is such a gap too. Only caller mistakes are errors: zero servings, or a
//! negative or non-finite quantity.
//!
//! ## Rounding
//!
//! `cost_per_recipe` and `cost_per_serving` are rounded to cents
//! independently, both from the unrounded cost. Recipe totals are the
//! rounded sums of the rounded per-ingredient values, so
//! `price_per_serving` may differ by a cent from
//! `total_cost_recipe / servings`.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_pricing::cost_calculator::CostCalculator;
//! use recipe_pricing::price_catalog::PriceCatalog;
//! use recipe_pricing::price_model::{Language, PriceCatalogEntry, RecipeIngredient, UnitType};
//!
//! let catalog = PriceCatalog::from_entries(vec![
//!     ("butter", PriceCatalogEntry::per_thousand("Butter", UnitType::Mass, 12.0)),
//! ])?;
//! let calculator = CostCalculator::new(&catalog);
//!
//! let butter = RecipeIngredient::untranslated("butter", 100.0, "g");
//! let cost = calculator.calculate_ingredient_cost(&butter, 4, Language::En)?;
//!
//! assert!(cost.matched);
//! assert_eq!(cost.cost_per_recipe, 1.2);
//! assert_eq!(cost.cost_per_serving, 0.3);
//! # Ok::<(), recipe_pricing::pricing_errors::PricingError>(())
//! ```

use crate::ingredient_matcher::IngredientMatcher;
use crate::price_catalog::PriceCatalog;
use crate::price_format::round_to_cents;
use crate::price_model::{IngredientCost, Language, Recipe, RecipeCost, RecipeIngredient, UnitType};
use crate::pricing_config::{PricingConfig, FALLBACK_COST_PER_SERVING};
use crate::pricing_errors::PricingError;
use crate::recipe_scaling::ServingMultiplier;
use crate::unit_normalizer;
use log::{debug, info, warn};

/// Prices ingredients and recipes against a catalog
#[derive(Debug, Clone)]
pub struct CostCalculator<'a> {
    catalog: &'a PriceCatalog,
    matcher: IngredientMatcher,
    fallback_cost_per_serving: f64,
}

impl<'a> CostCalculator<'a> {
    /// Calculator with the default match floor and fallback cost
    pub fn new(catalog: &'a PriceCatalog) -> Self {
        Self {
            catalog,
            matcher: IngredientMatcher::new(),
            fallback_cost_per_serving: FALLBACK_COST_PER_SERVING,
        }
    }

    pub fn with_config(catalog: &'a PriceCatalog, config: &PricingConfig) -> Self {
        Self {
            catalog,
            matcher: IngredientMatcher::from_config(config),
            fallback_cost_per_serving: config.fallback_cost_per_serving,
        }
    }

    /// Cost of one ingredient for `servings` servings
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidServings`] for zero servings and
    /// [`PricingError::InvalidIngredient`] for a negative or non-finite
    /// quantity. A blank name is a data gap and gets the fallback cost.
    pub fn calculate_ingredient_cost(
        &self,
        ingredient: &RecipeIngredient,
        servings: u32,
        language: Language,
    ) -> Result<IngredientCost, PricingError> {
        if servings == 0 {
            return Err(PricingError::InvalidServings(servings));
        }
        self.price_ingredient(ingredient, f64::from(servings), language)
    }

    /// Cost of a whole recipe at its nominal serving count. Section headings
    /// are skipped and produce no entry in `ingredient_costs`.
    pub fn calculate_recipe_cost(&self, recipe: &Recipe, language: Language) -> Result<RecipeCost, PricingError> {
        if recipe.servings == 0 {
            return Err(PricingError::InvalidServings(recipe.servings));
        }
        self.price_recipe(recipe, f64::from(recipe.servings), language)
    }

    /// Cost of `recipe` viewed at `multiplier`: quantities are scaled and
    /// per-serving values are divided by the exact scaled serving count
    /// (`servings * multiplier`, not rounded), so the per-serving price stays
    /// that of the nominal recipe.
    pub fn calculate_scaled_recipe_cost(
        &self,
        recipe: &Recipe,
        multiplier: ServingMultiplier,
        language: Language,
    ) -> Result<RecipeCost, PricingError> {
        let scaled = recipe.with_multiplier(multiplier)?;
        self.price_recipe(&scaled, f64::from(recipe.servings) * multiplier.value(), language)
    }

    fn price_recipe(&self, recipe: &Recipe, servings: f64, language: Language) -> Result<RecipeCost, PricingError> {
        let mut ingredient_costs = Vec::new();
        let mut line_indices = Vec::new();

        for (index, ingredient) in recipe.real_ingredients() {
            ingredient_costs.push(self.price_ingredient(ingredient, servings, language)?);
            line_indices.push(index);
        }

        let total_cost_recipe = round_to_cents(ingredient_costs.iter().map(|cost| cost.cost_per_recipe).sum());
        let price_per_serving = round_to_cents(ingredient_costs.iter().map(|cost| cost.cost_per_serving).sum());

        info!(
            "Recipe '{}': {} ingredients for {} servings, total {:.2}, per serving {:.2}",
            recipe.id,
            ingredient_costs.len(),
            servings,
            total_cost_recipe,
            price_per_serving
        );

        Ok(RecipeCost {
            ingredient_costs,
            total_cost_recipe,
            price_per_serving,
            line_indices,
        })
    }

    fn price_ingredient(
        &self,
        ingredient: &RecipeIngredient,
        servings: f64,
        language: Language,
    ) -> Result<IngredientCost, PricingError> {
        ingredient.validate(language)?;

        let name = ingredient.name.get(language);
        let unit = ingredient.unit.get(language);

        let found = match self.matcher.find_match(name, ingredient.ingredient_id, self.catalog) {
            Some(found) => found,
            None => {
                warn!("No price for '{}', using fallback cost", name);
                return Ok(self.fallback_cost(name, servings));
            }
        };

        let normalized = match unit_normalizer::normalize(ingredient.quantity, unit, found.entry.unit_type) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!("Cannot price '{}' as '{}': {}, using fallback cost", name, found.key, e);
                return Ok(self.fallback_cost(name, servings));
            }
        };

        let unit_price = match found.entry.unit_price() {
            Some(price) => price,
            None => {
                warn!("Catalog entry '{}' has no {} price, using fallback cost", found.key, found.entry.unit_type);
                return Ok(self.fallback_cost(name, servings));
            }
        };

        let raw_cost = match found.entry.unit_type {
            UnitType::Mass | UnitType::Volume => normalized / 1000.0 * unit_price,
            UnitType::Piece => normalized * unit_price,
        };

        debug!(
            "Priced '{}' via '{}': {} {} -> {:.4}",
            name,
            found.key,
            normalized,
            found.entry.unit_type.base_unit(),
            raw_cost
        );

        Ok(IngredientCost {
            ingredient_name: name.to_string(),
            cost_per_recipe: round_to_cents(raw_cost),
            cost_per_serving: round_to_cents(raw_cost / servings),
            matched: true,
            catalog_key: Some(found.key.to_string()),
        })
    }

    fn fallback_cost(&self, name: &str, servings: f64) -> IngredientCost {
        IngredientCost {
            ingredient_name: name.to_string(),
            cost_per_recipe: round_to_cents(self.fallback_cost_per_serving * servings),
            cost_per_serving: round_to_cents(self.fallback_cost_per_serving),
            matched: false,
            catalog_key: None,
        }
    }
}

/// Price one ingredient with default settings
pub fn calculate_ingredient_cost(
    ingredient: &RecipeIngredient,
    servings: u32,
    language: Language,
    catalog: &PriceCatalog,
) -> Result<IngredientCost, PricingError> {
    CostCalculator::new(catalog).calculate_ingredient_cost(ingredient, servings, language)
}

/// Price a recipe with default settings
pub fn calculate_recipe_cost(
    recipe: &Recipe,
    language: Language,
    catalog: &PriceCatalog,
) -> Result<RecipeCost, PricingError> {
    CostCalculator::new(catalog).calculate_recipe_cost(recipe, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_model::{BilingualText, IngredientLineItem, PriceCatalogEntry};

    fn fixture_catalog() -> PriceCatalog {
        PriceCatalog::from_entries(vec![
            ("olive_oil", PriceCatalogEntry::per_thousand("Olive oil", UnitType::Volume, 25.0)),
            ("eggs", PriceCatalogEntry::per_piece("Eggs", 0.8)),
            ("butter", PriceCatalogEntry::per_thousand("Butter", UnitType::Mass, 12.0)),
            ("milk", PriceCatalogEntry::per_thousand("Milk", UnitType::Volume, 5.0)),
            ("garlic", PriceCatalogEntry::per_piece("Garlic", 0.15)),
            ("soy_sauce", PriceCatalogEntry::per_thousand("Soy sauce", UnitType::Volume, 8.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_mass_ingredient() {
        let catalog = fixture_catalog();
        let cost = calculate_ingredient_cost(&RecipeIngredient::untranslated("butter", 100.0, "g"), 4, Language::En, &catalog).unwrap();
        assert!(cost.matched);
        assert_eq!(cost.cost_per_recipe, 1.2);
        assert_eq!(cost.cost_per_serving, 0.3);
        assert_eq!(cost.catalog_key.as_deref(), Some("butter"));
    }

    #[test]
    fn test_volume_ingredient_in_liters() {
        let catalog = fixture_catalog();
        let cost = calculate_ingredient_cost(&RecipeIngredient::untranslated("milk", 1.0, "l"), 4, Language::En, &catalog).unwrap();
        assert_eq!(cost.cost_per_recipe, 5.0);
        assert_eq!(cost.cost_per_serving, 1.25);
    }

    #[test]
    fn test_piece_ingredient_with_cloves() {
        let catalog = fixture_catalog();
        let cost = calculate_ingredient_cost(&RecipeIngredient::untranslated("garlic", 3.0, "cloves"), 4, Language::En, &catalog).unwrap();
        assert_eq!(cost.cost_per_recipe, 0.45);
        // 0.1125 rounds to 0.11
        assert_eq!(cost.cost_per_serving, 0.11);
    }

    #[test]
    fn test_tablespoons_of_liquid() {
        let catalog = fixture_catalog();
        let cost = calculate_ingredient_cost(&RecipeIngredient::untranslated("soy sauce", 2.0, "tbsp"), 4, Language::En, &catalog).unwrap();
        assert_eq!(cost.cost_per_recipe, 0.24);
    }

    #[test]
    fn test_unmatched_ingredient_uses_fallback() {
        let catalog = fixture_catalog();
        let cost = calculate_ingredient_cost(&RecipeIngredient::untranslated("saffron threads", 1.0, "g"), 4, Language::En, &catalog).unwrap();
        assert!(!cost.matched);
        assert_eq!(cost.cost_per_serving, 0.2);
        assert_eq!(cost.cost_per_recipe, 0.8);
        assert!(cost.catalog_key.is_none());
    }

    #[test]
    fn test_unsupported_unit_uses_fallback() {
        let catalog = fixture_catalog();
        let cost = calculate_ingredient_cost(&RecipeIngredient::untranslated("butter", 1.0, "knob"), 3, Language::En, &catalog).unwrap();
        assert!(!cost.matched);
        assert_eq!(cost.cost_per_serving, 0.2);
        assert_eq!(cost.cost_per_recipe, 0.6);
    }

    #[test]
    fn test_romanian_names_and_units() {
        let catalog = PriceCatalog::from_entries(vec![(
            "olive_oil",
            PriceCatalogEntry::per_thousand("Olive oil", UnitType::Volume, 25.0).with_bilingual_name("Ulei de măsline", "Olive oil"),
        )])
        .unwrap();
        let oil = RecipeIngredient::new(
            BilingualText::new("ulei de măsline", "olive oil"),
            2.0,
            BilingualText::new("linguri", "tbsp"),
        );

        let ro = calculate_ingredient_cost(&oil, 2, Language::Ro, &catalog).unwrap();
        let en = calculate_ingredient_cost(&oil, 2, Language::En, &catalog).unwrap();
        assert_eq!(ro.ingredient_name, "ulei de măsline");
        assert_eq!(ro.cost_per_recipe, 0.75);
        assert_eq!(ro.cost_per_recipe, en.cost_per_recipe);
    }

    #[test]
    fn test_invalid_arguments() {
        let catalog = fixture_catalog();
        let butter = RecipeIngredient::untranslated("butter", 100.0, "g");
        assert_eq!(
            calculate_ingredient_cost(&butter, 0, Language::En, &catalog),
            Err(PricingError::InvalidServings(0))
        );

        let negative = RecipeIngredient::untranslated("butter", -5.0, "g");
        assert!(matches!(
            calculate_ingredient_cost(&negative, 2, Language::En, &catalog),
            Err(PricingError::InvalidIngredient(_))
        ));
    }

    #[test]
    fn test_recipe_cost_end_to_end() {
        let catalog = fixture_catalog();
        let recipe = Recipe::new("omelette", BilingualText::same("Omelette"), 4)
            .with_item(RecipeIngredient::new(BilingualText::new("ulei de măsline", "olive oil"), 30.0, BilingualText::same("ml")))
            .with_item(RecipeIngredient::new(BilingualText::new("ouă", "eggs"), 2.0, BilingualText::new("buc", "pcs")))
            .with_item(RecipeIngredient::new(BilingualText::new("unt", "butter"), 50.0, BilingualText::same("g")));

        let cost = calculate_recipe_cost(&recipe, Language::En, &catalog).unwrap();
        let per_recipe: Vec<f64> = cost.ingredient_costs.iter().map(|c| c.cost_per_recipe).collect();
        assert_eq!(per_recipe, vec![0.75, 1.6, 0.6]);
        assert_eq!(cost.total_cost_recipe, 2.95);
        // 0.19 + 0.4 + 0.15
        assert_eq!(cost.price_per_serving, 0.74);
    }

    #[test]
    fn test_recipe_with_zero_servings_rejected() {
        let catalog = fixture_catalog();
        let recipe = Recipe::new("broken", BilingualText::same("Broken"), 0)
            .with_item(RecipeIngredient::untranslated("butter", 10.0, "g"));
        assert_eq!(
            calculate_recipe_cost(&recipe, Language::En, &catalog),
            Err(PricingError::InvalidServings(0))
        );
    }

    #[test]
    fn test_sections_are_skipped() {
        let catalog = fixture_catalog();
        let recipe = Recipe::new("r", BilingualText::same("R"), 4)
            .with_item(IngredientLineItem::section(BilingualText::new("Secțiune", "Section")))
            .with_item(RecipeIngredient::new(BilingualText::new("unt", "butter"), 10.0, BilingualText::same("g")));

        let cost = calculate_recipe_cost(&recipe, Language::En, &catalog).unwrap();
        assert_eq!(cost.ingredient_costs.len(), 1);
        assert!(cost.cost_for_line(0).is_none());
        assert_eq!(cost.cost_for_line(1).unwrap().ingredient_name, "butter");
    }

    #[test]
    fn test_configured_fallback() {
        let catalog = fixture_catalog();
        let config = PricingConfig {
            fallback_cost_per_serving: 0.5,
            ..Default::default()
        };
        let calculator = CostCalculator::with_config(&catalog, &config);
        let cost = calculator
            .calculate_ingredient_cost(&RecipeIngredient::untranslated("truffle", 1.0, "pcs"), 2, Language::En)
            .unwrap();
        assert_eq!(cost.cost_per_recipe, 1.0);
        assert_eq!(cost.cost_per_serving, 0.5);
    }

    #[test]
    fn test_blank_name_uses_fallback() {
        let catalog = fixture_catalog();
        let recipe = Recipe::new("r", BilingualText::same("R"), 2)
            .with_item(RecipeIngredient::untranslated("butter", 100.0, "g"))
            .with_item(RecipeIngredient::new(BilingualText::new("", "parsley"), 10.0, BilingualText::same("g")))
            .with_item(RecipeIngredient::new(BilingualText::new("-- 2 --", "dill"), 5.0, BilingualText::same("g")));

        let cost = calculate_recipe_cost(&recipe, Language::Ro, &catalog).unwrap();
        assert_eq!(cost.ingredient_costs.len(), 3);
        assert_eq!(cost.ingredient_costs[0].cost_per_recipe, 1.2);
        assert!(!cost.ingredient_costs[1].matched);
        assert_eq!(cost.ingredient_costs[1].cost_per_recipe, 0.4);
        assert!(!cost.ingredient_costs[2].matched);
        assert_eq!(cost.estimated_count(), 2);
    }

    #[test]
    fn test_scaled_cost_keeps_price_per_serving() {
        let catalog = fixture_catalog();
        let recipe = Recipe::new("r", BilingualText::same("R"), 3)
            .with_item(RecipeIngredient::untranslated("butter", 300.0, "g"))
            .with_item(RecipeIngredient::untranslated("saffron", 1.0, "g"));
        let calculator = CostCalculator::new(&catalog);

        let nominal = calculator.calculate_recipe_cost(&recipe, Language::En).unwrap();
        let half = calculator
            .calculate_scaled_recipe_cost(&recipe, ServingMultiplier::new(0.5).unwrap(), Language::En)
            .unwrap();

        assert_eq!(nominal.price_per_serving, 1.4);
        assert_eq!(half.price_per_serving, nominal.price_per_serving);
        // 150 g of butter plus fallback for 1.5 servings
        assert_eq!(half.ingredient_costs[0].cost_per_recipe, 1.8);
        assert_eq!(half.ingredient_costs[1].cost_per_recipe, 0.3);
        assert_eq!(half.total_cost_recipe, 2.1);
    }
}
