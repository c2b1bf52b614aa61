//! # Recipe Pricing
//!
//! Cost estimation for bilingual (Romanian/English) recipes: ingredients are
//! matched against a price catalog by id or fuzzy name, their quantities are
//! normalized to grams, milliliters or pieces, and per-ingredient costs are
//! aggregated into recipe totals and per-serving prices ready for display.

pub mod cost_calculator;
pub mod ingredient_matcher;
pub mod localization;
pub mod price_catalog;
pub mod price_format;
pub mod price_model;
pub mod pricing_config;
pub mod pricing_errors;
pub mod recipe_scaling;
pub mod unit_normalizer;
