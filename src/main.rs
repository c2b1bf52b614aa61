use anyhow::{Context, Result};
use recipe_pricing::cost_calculator::CostCalculator;
use recipe_pricing::localization::LocalizationManager;
use recipe_pricing::price_catalog::PriceCatalog;
use recipe_pricing::price_format::PriceFormatter;
use recipe_pricing::price_model::{IngredientLineItem, Language, Recipe};
use recipe_pricing::pricing_config::PricingConfig;
use recipe_pricing::recipe_scaling::{format_scaled_quantity, ServingMultiplier};
use std::env;
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Library modules log through `log`, this binary through `tracing`
    env_logger::init();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let config = PricingConfig::from_env()?;
    let prices_path = env::var("PRICES_PATH").unwrap_or_else(|_| "data/prices.json".to_string());
    let recipe_path =
        env::var("RECIPE_PATH").unwrap_or_else(|_| "data/recipes/omelette.json".to_string());
    let language = Language::detect(env::var("RECIPE_LANGUAGE").ok().as_deref());
    let multiplier = match env::var("RECIPE_MULTIPLIER") {
        Ok(raw) => {
            let value: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("RECIPE_MULTIPLIER is not a number: {raw}"))?;
            ServingMultiplier::new(value)
                .with_context(|| format!("RECIPE_MULTIPLIER must be 0.5 to 3 in 0.5 steps, got {value}"))?
        }
        Err(_) => ServingMultiplier::default(),
    };

    info!(prices = %prices_path, recipe = %recipe_path, %language, %multiplier, "Pricing recipe");

    let catalog = PriceCatalog::from_path(&prices_path)?;
    let recipe_json = fs::read_to_string(&recipe_path)
        .with_context(|| format!("Failed to read recipe {recipe_path}"))?;
    let recipe: Recipe = serde_json::from_str(&recipe_json)
        .with_context(|| format!("Failed to parse recipe {recipe_path}"))?;

    let calculator = CostCalculator::with_config(&catalog, &config);
    let cost = calculator.calculate_scaled_recipe_cost(&recipe, multiplier, language)?;
    debug!(matched = cost.matched_count(), estimated = cost.estimated_count(), "Recipe priced\n{}", cost);

    let formatter = PriceFormatter::with_config(&config)?;
    debug!(currency = formatter.currency(), "Rendering prices");
    let messages = LocalizationManager::new()?;
    let servings = format_scaled_quantity(f64::from(recipe.servings), multiplier.value());

    println!(
        "{}",
        messages.get_message_with_args(
            "recipe-cost-heading",
            language,
            &[("recipe", recipe.title.get(language)), ("servings", servings.as_str())],
        )
    );

    for (index, item) in recipe.ingredients.iter().enumerate() {
        match item {
            IngredientLineItem::Section(heading) => println!(
                "{}",
                messages.get_message_with_args(
                    "recipe-cost-section",
                    language,
                    &[("section", heading.section.get(language))],
                )
            ),
            IngredientLineItem::Ingredient(ingredient) => {
                let price = cost
                    .cost_for_line(index)
                    .map(|line| {
                        let mut text = formatter.price(line.cost_per_recipe, language);
                        if !line.matched {
                            text.push_str(&format!(" ({})", formatter.estimated_marker(language)));
                        }
                        text
                    })
                    .unwrap_or_default();
                println!(
                    "  • {} {} {}  {}",
                    format_scaled_quantity(ingredient.quantity, multiplier.value()),
                    ingredient.unit.get(language),
                    ingredient.name.get(language),
                    price
                );
            }
        }
    }

    println!("{}", formatter.price_per_serving(cost.price_per_serving, language));
    println!("{}", formatter.total_cost(cost.total_cost_recipe, language));

    Ok(())
}
