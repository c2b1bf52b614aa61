//! # Price Formatting Module
//!
//! Rounding and string rendering of monetary values. Rounding is half-up at
//! the cent, with a tiny nudge so that decimal halves which binary floating
//! point stores just below the half (2.005 is stored as 2.00499...) still
//! round up. The cost calculator rounds with the same function, so rendered
//! totals always match computed totals.

use crate::localization::LocalizationManager;
use crate::price_model::{Language, PriceCatalogEntry, UnitType};
use crate::pricing_config::{PricingConfig, DEFAULT_CURRENCY};
use crate::pricing_errors::PricingError;

// In cents; far below a cent, far above f64 error for kitchen-sized prices
const HALF_CENT_NUDGE: f64 = 1e-7;

/// Round to 2 decimal places, halves away from zero
///
/// ```rust
/// use recipe_pricing::price_format::round_to_cents;
///
/// assert_eq!(round_to_cents(0.1875), 0.19);
/// assert_eq!(round_to_cents(2.005), 2.01);
/// assert_eq!(round_to_cents(2.004), 2.0);
/// ```
pub fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    let nudged = if scaled < 0.0 {
        scaled - HALF_CENT_NUDGE
    } else {
        scaled + HALF_CENT_NUDGE
    };
    nudged.round() / 100.0
}

fn amount(value: f64) -> String {
    format!("{:.2}", round_to_cents(value))
}

/// `"X.XX RON"`
pub fn format_price(value: f64) -> String {
    format!("{} {}", amount(value), DEFAULT_CURRENCY)
}

/// `"X.XX RON / serving"`
pub fn format_price_per_serving(value: f64) -> String {
    format!("{} / serving", format_price(value))
}

/// `"X.XX RON total"`
pub fn format_total_cost(value: f64) -> String {
    format!("{} total", format_price(value))
}

/// Renders prices with a configured currency and localized qualifiers
pub struct PriceFormatter {
    currency: String,
    localization: LocalizationManager,
}

impl PriceFormatter {
    pub fn new() -> Result<Self, PricingError> {
        Self::with_config(&PricingConfig::default())
    }

    pub fn with_config(config: &PricingConfig) -> Result<Self, PricingError> {
        Ok(Self {
            currency: config.currency.clone(),
            localization: LocalizationManager::new()?,
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    fn render(&self, key: &str, value: f64, language: Language) -> String {
        let amount = amount(value);
        self.localization.get_message_with_args(
            key,
            language,
            &[("amount", amount.as_str()), ("currency", self.currency.as_str())],
        )
    }

    pub fn price(&self, value: f64, language: Language) -> String {
        self.render("price-amount", value, language)
    }

    pub fn price_per_serving(&self, value: f64, language: Language) -> String {
        self.render("price-per-serving", value, language)
    }

    pub fn total_cost(&self, value: f64, language: Language) -> String {
        self.render("price-total", value, language)
    }

    /// Marker shown next to ingredients priced with the fallback cost
    pub fn estimated_marker(&self, language: Language) -> String {
        self.localization.get_message("price-estimated", language, None)
    }

    /// Catalog unit price, e.g. `"12.00 RON / kg"` or `"0.80 RON / piece"`
    pub fn catalog_unit_price(&self, entry: &PriceCatalogEntry, language: Language) -> String {
        let key = match entry.unit_type {
            UnitType::Mass => "price-per-kilogram",
            UnitType::Volume => "price-per-liter",
            UnitType::Piece => "price-per-piece",
        };
        self.render(key, entry.unit_price().unwrap_or(0.0), language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_cents(2.005), 2.01);
        assert_eq!(round_to_cents(1.125), 1.13);
        assert_eq!(round_to_cents(0.6000000000000001), 0.6);
        assert_eq!(round_to_cents(0.7375), 0.74);
        assert_eq!(round_to_cents(0.0025), 0.0);
        assert_eq!(round_to_cents(-1.005), -1.01);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(2.3), "2.30 RON");
        assert_eq!(format_price(2.356), "2.36 RON");
        assert_eq!(format_price(2.0), "2.00 RON");
        assert_eq!(format_price(2.005), "2.01 RON");
    }

    #[test]
    fn test_format_qualifiers() {
        assert_eq!(format_price_per_serving(2.35), "2.35 RON / serving");
        assert_eq!(format_total_cost(9.4), "9.40 RON total");
    }

    #[test]
    fn test_localized_formatter() {
        let formatter = PriceFormatter::new().unwrap();

        assert_eq!(formatter.price(1.1, Language::En), "1.10 RON");
        assert_eq!(formatter.price_per_serving(2.35, Language::En), "2.35 RON / serving");
        assert_eq!(formatter.price_per_serving(2.35, Language::Ro), "2.35 RON / porție");
        assert_eq!(formatter.total_cost(9.4, Language::Ro), "9.40 RON total");
        assert_eq!(formatter.estimated_marker(Language::Ro), "estimat");
    }

    #[test]
    fn test_custom_currency() {
        let config = PricingConfig {
            currency: "EUR".to_string(),
            ..Default::default()
        };
        let formatter = PriceFormatter::with_config(&config).unwrap();
        assert_eq!(formatter.currency(), "EUR");
        assert_eq!(formatter.total_cost(3.0, Language::En), "3.00 EUR total");
    }

    #[test]
    fn test_catalog_unit_price() {
        let formatter = PriceFormatter::new().unwrap();
        let oil = PriceCatalogEntry::per_thousand("Olive oil", UnitType::Volume, 25.0);
        let butter = PriceCatalogEntry::per_thousand("Butter", UnitType::Mass, 12.0);
        let egg = PriceCatalogEntry::per_piece("Egg", 0.8);

        assert_eq!(formatter.catalog_unit_price(&oil, Language::En), "25.00 RON / L");
        assert_eq!(formatter.catalog_unit_price(&butter, Language::En), "12.00 RON / kg");
        assert_eq!(formatter.catalog_unit_price(&egg, Language::En), "0.80 RON / piece");
        assert_eq!(formatter.catalog_unit_price(&egg, Language::Ro), "0.80 RON / buc");
    }
}
