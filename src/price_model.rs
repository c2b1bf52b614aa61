//! # Pricing Data Model
//!
//! This module defines the data structures shared by the pricing engine: the
//! bilingual recipe side (recipes, ingredient lines, section headings) and the
//! catalog side (priced ingredient definitions), plus the computed cost
//! records handed to display code.
//!
//! ## Core Concepts
//!
//! - **Catalog entry**: a priced ingredient, either per 1000 g/ml or per piece
//! - **Ingredient line**: a real ingredient or a section heading in a recipe
//! - **Ingredient cost**: the computed cost of one real ingredient
//! - **Recipe cost**: per-ingredient costs plus recipe-level aggregates
//!
//! ## Usage
//!
//! ```rust
//! use recipe_pricing::price_model::{BilingualText, IngredientLineItem, RecipeIngredient};
//!
//! let butter = RecipeIngredient::new(
//!     BilingualText::new("unt", "butter"),
//!     50.0,
//!     BilingualText::same("g"),
//! );
//! let heading = IngredientLineItem::section(BilingualText::new("Pentru aluat", "For the dough"));
//!
//! assert!(heading.is_section());
//! assert_eq!(butter.quantity, 50.0);
//! ```

use crate::pricing_errors::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display language for names and units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Romanian
    Ro,
    /// English
    #[default]
    En,
}

impl Language {
    /// Language code used in recipe data and locale folders
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ro => "ro",
            Language::En => "en",
        }
    }

    /// Resolve a (possibly regional) language code, falling back to English
    pub fn detect(code: Option<&str>) -> Self {
        match code {
            Some(code) if code.to_lowercase().starts_with("ro") => Language::Ro,
            _ => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A text available in both Romanian and English
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub ro: String,
    pub en: String,
}

impl BilingualText {
    pub fn new(ro: &str, en: &str) -> Self {
        Self {
            ro: ro.to_string(),
            en: en.to_string(),
        }
    }

    /// Same text in both languages (units such as "g" or "ml")
    pub fn same(text: &str) -> Self {
        Self::new(text, text)
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Ro => &self.ro,
            Language::En => &self.en,
        }
    }
}

/// Unit family a catalog price is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// Priced per 1000 grams
    Mass,
    /// Priced per 1000 milliliters
    Volume,
    /// Priced per single piece
    Piece,
}

impl UnitType {
    /// Name of the base unit quantities are normalized to
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitType::Mass => "g",
            UnitType::Volume => "ml",
            UnitType::Piece => "pcs",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitType::Mass => "mass",
            UnitType::Volume => "volume",
            UnitType::Piece => "piece",
        };
        write!(f, "{name}")
    }
}

/// Grouping category of a catalog entry. Display only, never used for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum PriceCategory {
    #[serde(rename = "Proteins")]
    Proteins,
    #[serde(rename = "Dairy")]
    Dairy,
    #[serde(rename = "Fruits and Vegetables")]
    FruitsAndVegetables,
    #[serde(rename = "Spices & Seasonings")]
    SpicesAndSeasonings,
    #[serde(rename = "Pantry")]
    Pantry,
    #[serde(rename = "Bakery")]
    Bakery,
    #[serde(rename = "Beverages")]
    Beverages,
    /// Any category label this build does not know about
    #[default]
    #[serde(other)]
    Other,
}

impl PriceCategory {
    /// Categories in the order the price list shows them
    pub const DISPLAY_ORDER: [PriceCategory; 8] = [
        PriceCategory::Proteins,
        PriceCategory::Dairy,
        PriceCategory::FruitsAndVegetables,
        PriceCategory::SpicesAndSeasonings,
        PriceCategory::Pantry,
        PriceCategory::Bakery,
        PriceCategory::Beverages,
        PriceCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PriceCategory::Proteins => "Proteins",
            PriceCategory::Dairy => "Dairy",
            PriceCategory::FruitsAndVegetables => "Fruits and Vegetables",
            PriceCategory::SpicesAndSeasonings => "Spices & Seasonings",
            PriceCategory::Pantry => "Pantry",
            PriceCategory::Bakery => "Bakery",
            PriceCategory::Beverages => "Beverages",
            PriceCategory::Other => "Other",
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Display name of a catalog entry: a single string in older catalogs,
/// bilingual in newer ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogName {
    Single(String),
    Bilingual(BilingualText),
}

impl CatalogName {
    /// Name to show for the given language
    pub fn display(&self, language: Language) -> &str {
        match self {
            CatalogName::Single(name) => name,
            CatalogName::Bilingual(text) => text.get(language),
        }
    }

    /// Every spelling of the name, used by the fuzzy matcher
    pub fn variants(&self) -> Vec<&str> {
        match self {
            CatalogName::Single(name) => vec![name.as_str()],
            CatalogName::Bilingual(text) => vec![text.ro.as_str(), text.en.as_str()],
        }
    }
}

impl From<&str> for CatalogName {
    fn from(name: &str) -> Self {
        CatalogName::Single(name.to_string())
    }
}

/// One priced ingredient definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCatalogEntry {
    /// Stable identifier referenced by `ingredientId` in recipes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    pub name: CatalogName,

    #[serde(default)]
    pub category: PriceCategory,

    #[serde(rename = "unit_type", alias = "unitType")]
    pub unit_type: UnitType,

    /// Price per 1000 g or 1000 ml, meaningful for mass and volume entries
    #[serde(
        rename = "price_per_1000",
        alias = "pricePer1000",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price_per_1000: Option<f64>,

    /// Price per piece, meaningful for piece entries
    #[serde(
        rename = "price_per_piece",
        alias = "pricePerPiece",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price_per_piece: Option<f64>,
}

impl PriceCatalogEntry {
    /// Create an entry priced per 1000 base units (mass or volume)
    pub fn per_thousand(name: &str, unit_type: UnitType, price: f64) -> Self {
        Self {
            id: None,
            name: CatalogName::from(name),
            category: PriceCategory::Other,
            unit_type,
            price_per_1000: Some(price),
            price_per_piece: None,
        }
    }

    /// Create an entry priced per piece
    pub fn per_piece(name: &str, price: f64) -> Self {
        Self {
            id: None,
            name: CatalogName::from(name),
            category: PriceCategory::Other,
            unit_type: UnitType::Piece,
            price_per_1000: None,
            price_per_piece: Some(price),
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_category(mut self, category: PriceCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_bilingual_name(mut self, ro: &str, en: &str) -> Self {
        self.name = CatalogName::Bilingual(BilingualText::new(ro, en));
        self
    }

    /// The price field selected by the unit type
    pub fn unit_price(&self) -> Option<f64> {
        match self.unit_type {
            UnitType::Mass | UnitType::Volume => self.price_per_1000,
            UnitType::Piece => self.price_per_piece,
        }
    }

    /// Check that the price field selected by the unit type is usable
    pub fn validate(&self, key: &str) -> Result<(), PricingError> {
        match self.unit_price() {
            Some(price) if price.is_finite() && price >= 0.0 => Ok(()),
            Some(price) => Err(PricingError::InvalidCatalogEntry(format!(
                "{key}: price {price} is not a non-negative number"
            ))),
            None => {
                let field = match self.unit_type {
                    UnitType::Piece => "price_per_piece",
                    _ => "price_per_1000",
                };
                Err(PricingError::InvalidCatalogEntry(format!(
                    "{key}: {} entry is missing {field}",
                    self.unit_type
                )))
            }
        }
    }
}

/// A real ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: BilingualText,
    pub quantity: f64,
    pub unit: BilingualText,

    /// Catalog id for exact matching
    #[serde(
        rename = "ingredientId",
        alias = "ingredient_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ingredient_id: Option<u32>,
}

impl RecipeIngredient {
    pub fn new(name: BilingualText, quantity: f64, unit: BilingualText) -> Self {
        Self {
            name,
            quantity,
            unit,
            ingredient_id: None,
        }
    }

    /// Ingredient whose name and unit read the same in both languages
    pub fn untranslated(name: &str, quantity: f64, unit: &str) -> Self {
        Self::new(BilingualText::same(name), quantity, BilingualText::same(unit))
    }

    pub fn with_ingredient_id(mut self, id: u32) -> Self {
        self.ingredient_id = Some(id);
        self
    }

    /// Reject quantities a caller should never have produced. A blank name
    /// is not rejected here, it simply finds no catalog match.
    pub fn validate(&self, language: Language) -> Result<(), PricingError> {
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(PricingError::InvalidIngredient(format!(
                "{}: quantity {} is not a non-negative number",
                self.name.get(language),
                self.quantity
            )));
        }
        Ok(())
    }
}

/// A grouping label inside an ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionHeading {
    pub section: BilingualText,
}

/// One entry of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientLineItem {
    Ingredient(RecipeIngredient),
    Section(SectionHeading),
}

impl IngredientLineItem {
    pub fn section(label: BilingualText) -> Self {
        IngredientLineItem::Section(SectionHeading { section: label })
    }

    pub fn is_section(&self) -> bool {
        matches!(self, IngredientLineItem::Section(_))
    }

    pub fn as_ingredient(&self) -> Option<&RecipeIngredient> {
        match self {
            IngredientLineItem::Ingredient(ingredient) => Some(ingredient),
            IngredientLineItem::Section(_) => None,
        }
    }
}

impl From<RecipeIngredient> for IngredientLineItem {
    fn from(ingredient: RecipeIngredient) -> Self {
        IngredientLineItem::Ingredient(ingredient)
    }
}

/// A recipe as produced by the recipe data layer. Fields the pricing engine
/// does not read (images, instructions, notes) are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub title: BilingualText,
    /// Nominal serving count the quantities are written for
    pub servings: u32,
    pub ingredients: Vec<IngredientLineItem>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Recipe {
    pub fn new(id: &str, title: BilingualText, servings: u32) -> Self {
        Self {
            id: id.to_string(),
            category: String::new(),
            title,
            servings,
            ingredients: Vec::new(),
            keywords: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: impl Into<IngredientLineItem>) -> Self {
        self.ingredients.push(item.into());
        self
    }

    /// Real ingredients together with their index in the raw list
    pub fn real_ingredients(&self) -> impl Iterator<Item = (usize, &RecipeIngredient)> {
        self.ingredients
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.as_ingredient().map(|ingredient| (index, ingredient)))
    }
}

/// Computed cost of one real ingredient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientCost {
    /// Ingredient name in the language the cost was computed for
    pub ingredient_name: String,
    /// Cost for the serving count the calculation was run with
    pub cost_per_recipe: f64,
    pub cost_per_serving: f64,
    /// False when the fallback cost was applied
    pub matched: bool,
    /// Catalog key of the entry that priced this ingredient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_key: Option<String>,
}

impl fmt::Display for IngredientCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}", self.ingredient_name, self.cost_per_recipe)?;
        if !self.matched {
            write!(f, " (estimated)")?;
        }
        Ok(())
    }
}

/// Computed cost of a whole recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCost {
    /// One entry per real ingredient, section headings excluded
    pub ingredient_costs: Vec<IngredientCost>,
    pub total_cost_recipe: f64,
    pub price_per_serving: f64,
    /// Raw-list index of each entry in `ingredient_costs`
    #[serde(skip)]
    pub line_indices: Vec<usize>,
}

impl RecipeCost {
    /// Cost of the line at `index` of the raw ingredient list, `None` for
    /// section headings and out-of-range indices
    pub fn cost_for_line(&self, index: usize) -> Option<&IngredientCost> {
        self.line_indices
            .iter()
            .position(|&line| line == index)
            .and_then(|position| self.ingredient_costs.get(position))
    }

    pub fn matched_count(&self) -> usize {
        self.ingredient_costs.iter().filter(|cost| cost.matched).count()
    }

    pub fn estimated_count(&self) -> usize {
        self.ingredient_costs.len() - self.matched_count()
    }
}

impl fmt::Display for RecipeCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Recipe cost ({} priced, {} estimated): {:.2} total, {:.2} per serving",
            self.matched_count(),
            self.estimated_count(),
            self.total_cost_recipe,
            self.price_per_serving
        )?;

        for cost in &self.ingredient_costs {
            writeln!(f, "  • {}", cost)?;
        }

        Ok(())
    }
}
