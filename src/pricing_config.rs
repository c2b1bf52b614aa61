//! # Pricing Configuration Module
//!
//! This module defines the tunable constants of the pricing engine and how
//! they are read from the environment.

use crate::pricing_errors::PricingError;
use log::debug;
use std::env;

// Constants for pricing configuration
pub const DEFAULT_CURRENCY: &str = "RON";
pub const FALLBACK_COST_PER_SERVING: f64 = 0.2;
pub const MIN_MATCH_LENGTH: usize = 4;

/// Configuration structure for cost calculation and display
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Currency suffix used when rendering prices
    pub currency: String,
    /// Flat cost per serving applied to ingredients that cannot be priced
    pub fallback_cost_per_serving: f64,
    /// Shortest common substring accepted by the fuzzy matcher
    pub min_match_length: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            fallback_cost_per_serving: FALLBACK_COST_PER_SERVING,
            min_match_length: MIN_MATCH_LENGTH,
        }
    }
}

impl PricingConfig {
    /// Build a configuration from `PRICING_*` environment variables.
    ///
    /// Unset variables keep their default. Values that do not parse, a
    /// negative fallback cost, or a zero match length are rejected.
    pub fn from_env() -> Result<Self, PricingError> {
        let mut config = Self::default();

        if let Ok(currency) = env::var("PRICING_CURRENCY") {
            let currency = currency.trim();
            if currency.is_empty() {
                return Err(PricingError::Configuration(
                    "PRICING_CURRENCY must not be empty".to_string(),
                ));
            }
            config.currency = currency.to_string();
        }

        if let Ok(raw) = env::var("PRICING_FALLBACK_COST") {
            let cost: f64 = raw.trim().parse().map_err(|_| {
                PricingError::Configuration(format!("PRICING_FALLBACK_COST is not a number: {raw}"))
            })?;
            if !cost.is_finite() || cost < 0.0 {
                return Err(PricingError::Configuration(format!(
                    "PRICING_FALLBACK_COST must be non-negative, got {cost}"
                )));
            }
            config.fallback_cost_per_serving = cost;
        }

        if let Ok(raw) = env::var("PRICING_MIN_MATCH_LENGTH") {
            let length: usize = raw.trim().parse().map_err(|_| {
                PricingError::Configuration(format!(
                    "PRICING_MIN_MATCH_LENGTH is not a positive integer: {raw}"
                ))
            })?;
            if length == 0 {
                return Err(PricingError::Configuration(
                    "PRICING_MIN_MATCH_LENGTH must be at least 1".to_string(),
                ));
            }
            config.min_match_length = length;
        }

        debug!(
            "Loaded pricing config: currency={}, fallback={}, min_match_length={}",
            config.currency, config.fallback_cost_per_serving, config.min_match_length
        );
        Ok(config)
    }
}
