//! # Pricing Error Types Module
//!
//! This module defines the error types of the pricing engine. Only caller
//! contract violations and data-loading failures are errors; an unknown
//! ingredient or an unknown unit is absorbed by the cost calculator and
//! priced with the fallback cost instead.

/// Custom error types for pricing operations
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Serving count of zero
    InvalidServings(u32),
    /// Ingredient line the caller should never have produced
    InvalidIngredient(String),
    /// Unit label not recognized for a unit family
    UnsupportedUnit(String),
    /// Catalog or recipe JSON that does not parse
    CatalogParse(String),
    /// Catalog entry violating the one-price-per-unit-type rule
    InvalidCatalogEntry(String),
    /// File access errors
    Io(String),
    /// Environment configuration errors
    Configuration(String),
    /// Locale resource errors
    Localization(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InvalidServings(servings) => {
                write!(f, "Invalid servings: {servings} (must be at least 1)")
            }
            PricingError::InvalidIngredient(msg) => write!(f, "Invalid ingredient: {msg}"),
            PricingError::UnsupportedUnit(msg) => write!(f, "Unsupported unit: {msg}"),
            PricingError::CatalogParse(msg) => write!(f, "Catalog parse error: {msg}"),
            PricingError::InvalidCatalogEntry(msg) => write!(f, "Invalid catalog entry: {msg}"),
            PricingError::Io(msg) => write!(f, "I/O error: {msg}"),
            PricingError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            PricingError::Localization(msg) => write!(f, "Localization error: {msg}"),
        }
    }
}

impl std::error::Error for PricingError {}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::CatalogParse(err.to_string())
    }
}

impl From<std::io::Error> for PricingError {
    fn from(err: std::io::Error) -> Self {
        PricingError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for PricingError {
    fn from(err: anyhow::Error) -> Self {
        PricingError::Localization(err.to_string())
    }
}
