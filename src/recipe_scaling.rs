//! # Recipe Scaling
//!
//! Serving-multiplier state for the ingredient list, scaled quantity
//! display, and scaled copies of a recipe that the cost calculator can
//! price directly.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_pricing::recipe_scaling::{format_scaled_quantity, ServingMultiplier};
//!
//! let multiplier = ServingMultiplier::default().increment();
//! assert_eq!(multiplier.value(), 1.5);
//! assert_eq!(format_scaled_quantity(250.0, multiplier.value()), "375");
//! assert_eq!(format_scaled_quantity(1.0 / 3.0, 1.0), "0.33");
//! ```

use crate::price_model::{IngredientLineItem, Recipe};
use crate::pricing_errors::PricingError;
use log::debug;
use std::fmt;

pub const MIN_MULTIPLIER: f64 = 0.5;
pub const MAX_MULTIPLIER: f64 = 3.0;
pub const MULTIPLIER_STEP: f64 = 0.5;

/// Serving multiplier between 0.5x and 3x in 0.5x steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServingMultiplier(f64);

impl Default for ServingMultiplier {
    fn default() -> Self {
        Self(1.0)
    }
}

impl ServingMultiplier {
    /// Multiplier for `value`, `None` when outside the range or off-step
    pub fn new(value: f64) -> Option<Self> {
        let steps = value / MULTIPLIER_STEP;
        let on_step = (steps - steps.round()).abs() < 1e-9;
        (on_step && (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&value)).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// One step up, unchanged at the maximum
    pub fn increment(self) -> Self {
        Self::new(self.0 + MULTIPLIER_STEP).unwrap_or(self)
    }

    /// One step down, unchanged at the minimum
    pub fn decrement(self) -> Self {
        Self::new(self.0 - MULTIPLIER_STEP).unwrap_or(self)
    }

    pub fn can_increment(&self) -> bool {
        self.0 < MAX_MULTIPLIER
    }

    pub fn can_decrement(&self) -> bool {
        self.0 > MIN_MULTIPLIER
    }
}

impl fmt::Display for ServingMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}

/// Quantity times multiplier for display: whole numbers without decimals,
/// otherwise at most two decimals with trailing zeros dropped
pub fn format_scaled_quantity(quantity: f64, multiplier: f64) -> String {
    let scaled = quantity * multiplier;
    if scaled.fract() == 0.0 {
        return format!("{}", scaled);
    }

    let fixed = format!("{:.2}", scaled);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl Recipe {
    /// Copy of the recipe with every quantity multiplied by `ratio` and the
    /// serving count scaled to match (rounded, at least 1). Section headings
    /// are kept in place. Price a multiplier view with
    /// [`CostCalculator::calculate_scaled_recipe_cost`](crate::cost_calculator::CostCalculator::calculate_scaled_recipe_cost),
    /// which divides by the unrounded serving count.
    pub fn scaled(&self, ratio: f64) -> Result<Recipe, PricingError> {
        if self.servings == 0 {
            return Err(PricingError::InvalidServings(self.servings));
        }
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(PricingError::InvalidIngredient(format!(
                "scaling ratio must be positive, got {ratio}"
            )));
        }

        let mut scaled = self.clone();
        scaled.servings = ((f64::from(self.servings) * ratio).round() as u32).max(1);
        for item in &mut scaled.ingredients {
            if let IngredientLineItem::Ingredient(ingredient) = item {
                ingredient.quantity *= ratio;
            }
        }

        debug!(
            "Scaled recipe '{}' by {}: {} -> {} servings",
            self.id, ratio, self.servings, scaled.servings
        );
        Ok(scaled)
    }

    /// Copy of the recipe rewritten for `servings` servings
    pub fn scaled_to_servings(&self, servings: u32) -> Result<Recipe, PricingError> {
        if servings == 0 {
            return Err(PricingError::InvalidServings(servings));
        }
        if self.servings == 0 {
            return Err(PricingError::InvalidServings(self.servings));
        }
        let mut scaled = self.scaled(f64::from(servings) / f64::from(self.servings))?;
        scaled.servings = servings;
        Ok(scaled)
    }

    /// Copy of the recipe for a serving multiplier
    pub fn with_multiplier(&self, multiplier: ServingMultiplier) -> Result<Recipe, PricingError> {
        self.scaled(multiplier.value())
    }
}
