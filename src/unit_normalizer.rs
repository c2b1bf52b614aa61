//! # Unit Normalizer
//!
//! Converts a recipe quantity written in an arbitrary unit label into the
//! base unit of a catalog entry's unit family: grams for mass, milliliters
//! for volume, piece count for pieces.
//!
//! Labels are matched case-insensitively in English and Romanian. A label
//! that is not known for the requested family is reported as
//! [`PricingError::UnsupportedUnit`] instead of being passed through
//! unchanged, so a wrong guess never ends up in a price.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_pricing::price_model::UnitType;
//! use recipe_pricing::unit_normalizer::normalize;
//!
//! assert_eq!(normalize(2.0, "kg", UnitType::Mass)?, 2000.0);
//! assert_eq!(normalize(2.0, "linguri", UnitType::Volume)?, 30.0);
//! assert!(normalize(1.0, "handful", UnitType::Mass).is_err());
//! # Ok::<(), recipe_pricing::pricing_errors::PricingError>(())
//! ```

use crate::price_model::UnitType;
use crate::pricing_errors::PricingError;
use lazy_static::lazy_static;
use log::{debug, trace};
use std::collections::HashMap;

// Kitchen measure conversions
pub const TSP_FACTOR: f64 = 5.0;
pub const TBSP_FACTOR: f64 = 15.0;
pub const CUP_TO_GRAMS: f64 = 200.0;
pub const CUP_TO_ML: f64 = 240.0;
pub const PINCH_TO_GRAMS: f64 = 0.5;
pub const KILO_FACTOR: f64 = 1000.0;

const TEASPOON_LABELS: &[&str] = &[
    "tsp", "teaspoon", "teaspoons", "linguriță", "lingurițe", "lingurita", "lingurite",
];
const TABLESPOON_LABELS: &[&str] = &[
    "tbsp", "tablespoon", "tablespoons", "lingură", "linguri", "lingura",
];
const CUP_LABELS: &[&str] = &["cup", "cups", "cana", "cană", "căni", "cani"];

lazy_static! {
    /// Factors to grams
    static ref MASS_FACTORS: HashMap<&'static str, f64> = {
        let mut map = HashMap::new();
        for label in ["g", "gram", "grams", "gramme", "grame"] {
            map.insert(label, 1.0);
        }
        for label in ["kg", "kilogram", "kilograms", "kilograme"] {
            map.insert(label, KILO_FACTOR);
        }
        for label in TEASPOON_LABELS {
            map.insert(*label, TSP_FACTOR);
        }
        for label in TABLESPOON_LABELS {
            map.insert(*label, TBSP_FACTOR);
        }
        for label in CUP_LABELS {
            map.insert(*label, CUP_TO_GRAMS);
        }
        for label in ["pinch", "pinches", "praf"] {
            map.insert(label, PINCH_TO_GRAMS);
        }
        map
    };

    /// Factors to milliliters
    static ref VOLUME_FACTORS: HashMap<&'static str, f64> = {
        let mut map = HashMap::new();
        for label in ["ml", "milliliter", "milliliters", "millilitre", "millilitres", "mililitri"] {
            map.insert(label, 1.0);
        }
        for label in ["l", "liter", "liters", "litre", "litres", "litru", "litri"] {
            map.insert(label, KILO_FACTOR);
        }
        for label in TEASPOON_LABELS {
            map.insert(*label, TSP_FACTOR);
        }
        for label in TABLESPOON_LABELS {
            map.insert(*label, TBSP_FACTOR);
        }
        for label in CUP_LABELS {
            map.insert(*label, CUP_TO_ML);
        }
        map
    };

    /// Labels that already count pieces
    static ref PIECE_LABELS: Vec<&'static str> = vec![
        "pcs", "pc", "piece", "pieces", "buc", "bucată", "bucata", "bucăți", "bucati",
        "clove", "cloves", "căței", "cățel", "catei", "catel",
    ];
}

/// Lowercase, trim and drop a trailing abbreviation dot ("Tbsp." -> "tbsp")
fn clean_label(unit_label: &str) -> String {
    unit_label.trim().trim_end_matches('.').trim().to_lowercase()
}

/// Multiplier from `unit_label` to the base unit of `unit_type`, if the
/// label is known for that family
pub fn conversion_factor(unit_label: &str, unit_type: UnitType) -> Option<f64> {
    let label = clean_label(unit_label);
    trace!("Looking up unit '{}' for {} pricing", label, unit_type);

    match unit_type {
        UnitType::Mass => MASS_FACTORS.get(label.as_str()).copied(),
        UnitType::Volume => VOLUME_FACTORS.get(label.as_str()).copied(),
        UnitType::Piece => PIECE_LABELS.contains(&label.as_str()).then_some(1.0),
    }
}

/// Check whether a unit label can be priced for a unit family
pub fn is_supported(unit_label: &str, unit_type: UnitType) -> bool {
    conversion_factor(unit_label, unit_type).is_some()
}

/// Express `quantity` of `unit_label` in the base unit of `unit_type`
///
/// # Errors
///
/// Returns [`PricingError::UnsupportedUnit`] when the label is not a
/// recognized unit of the family.
pub fn normalize(quantity: f64, unit_label: &str, unit_type: UnitType) -> Result<f64, PricingError> {
    match conversion_factor(unit_label, unit_type) {
        Some(factor) => {
            let normalized = quantity * factor;
            debug!(
                "Normalized {} {} -> {} {}",
                quantity,
                unit_label,
                normalized,
                unit_type.base_unit()
            );
            Ok(normalized)
        }
        None => Err(PricingError::UnsupportedUnit(format!(
            "'{}' is not a {} unit",
            unit_label.trim(),
            unit_type
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_conversions() {
        assert_eq!(normalize(250.0, "g", UnitType::Mass).unwrap(), 250.0);
        assert_eq!(normalize(1.5, "kg", UnitType::Mass).unwrap(), 1500.0);
        assert_eq!(normalize(2.0, "tsp", UnitType::Mass).unwrap(), 10.0);
        assert_eq!(normalize(1.0, "linguriță", UnitType::Mass).unwrap(), 5.0);
        assert_eq!(normalize(2.0, "tablespoon", UnitType::Mass).unwrap(), 30.0);
        assert_eq!(normalize(1.0, "lingură", UnitType::Mass).unwrap(), 15.0);
        assert_eq!(normalize(1.0, "cup", UnitType::Mass).unwrap(), 200.0);
        assert_eq!(normalize(1.0, "cana", UnitType::Mass).unwrap(), 200.0);
        assert_eq!(normalize(2.0, "pinch", UnitType::Mass).unwrap(), 1.0);
        assert_eq!(normalize(1.0, "praf", UnitType::Mass).unwrap(), 0.5);
    }

    #[test]
    fn test_volume_conversions() {
        assert_eq!(normalize(30.0, "ml", UnitType::Volume).unwrap(), 30.0);
        assert_eq!(normalize(1.0, "l", UnitType::Volume).unwrap(), 1000.0);
        assert_eq!(normalize(2.0, "liters", UnitType::Volume).unwrap(), 2000.0);
        assert_eq!(normalize(1.0, "tsp", UnitType::Volume).unwrap(), 5.0);
        assert_eq!(normalize(2.0, "tbsp", UnitType::Volume).unwrap(), 30.0);
        assert_eq!(normalize(1.0, "cup", UnitType::Volume).unwrap(), 240.0);
    }

    #[test]
    fn test_piece_labels_are_identity() {
        for label in ["pcs", "piece", "pieces", "buc", "bucată", "bucăți", "cloves", "căței"] {
            assert_eq!(normalize(3.0, label, UnitType::Piece).unwrap(), 3.0, "{label}");
        }
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        assert_eq!(normalize(1.0, "KG", UnitType::Mass).unwrap(), 1000.0);
        assert_eq!(normalize(1.0, " Tbsp. ", UnitType::Volume).unwrap(), 15.0);
        assert_eq!(normalize(1.0, "L", UnitType::Volume).unwrap(), 1000.0);
    }

    #[test]
    fn test_unknown_label_fails() {
        assert!(matches!(
            normalize(1.0, "handful", UnitType::Mass),
            Err(PricingError::UnsupportedUnit(_))
        ));
        assert!(normalize(1.0, "", UnitType::Volume).is_err());
    }

    #[test]
    fn test_label_from_wrong_family_fails() {
        // A pinch has no volume conversion and grams are not pieces
        assert!(normalize(1.0, "pinch", UnitType::Volume).is_err());
        assert!(normalize(100.0, "g", UnitType::Piece).is_err());
        assert!(normalize(2.0, "pcs", UnitType::Mass).is_err());
        assert!(!is_supported("ml", UnitType::Mass));
    }
}
