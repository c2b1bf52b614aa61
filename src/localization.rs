//! # Localization Module
//!
//! Fluent bundles for the display strings of the pricing engine, one per
//! supported [`Language`]. Resources are compiled into the binary from
//! `locales/<lang>/main.ftl`.

use crate::price_model::Language;
use anyhow::{anyhow, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

const EN_RESOURCE: &str = include_str!("../locales/en/main.ftl");
const RO_RESOURCE: &str = include_str!("../locales/ro/main.ftl");

/// Localization manager for price display strings
pub struct LocalizationManager {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with English and Romanian bundles
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (language, source) in [(Language::En, EN_RESOURCE), (Language::Ro, RO_RESOURCE)] {
            let locale: LanguageIdentifier = language.code().parse()?;
            bundles.insert(language, Self::create_bundle(&locale, source)?);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier, source: &str) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Plain text output, no Unicode isolation marks around placeables
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Invalid {} resource: {:?}", locale, errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Conflicting {} messages: {:?}", locale, errors))?;

        Ok(bundle)
    }

    /// Get a localized message, falling back to English for keys the
    /// requested language lacks
    pub fn get_message(&self, key: &str, language: Language, args: Option<&HashMap<&str, &str>>) -> String {
        let bundle = [language, Language::En]
            .iter()
            .filter_map(|lang| self.bundles.get(lang))
            .find(|bundle| bundle.has_message(key));

        let bundle = match bundle {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match bundle.get_message(key).and_then(|msg| msg.value()) {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();

        if let Some(args) = args {
            let fluent_args =
                FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));

            let _ = bundle.write_pattern(&mut value, pattern, Some(&fluent_args), &mut vec![]);
        } else {
            let _ = bundle.write_pattern(&mut value, pattern, None, &mut vec![]);
        }

        value
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, language: Language, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, language, Some(&args_map))
    }
}
