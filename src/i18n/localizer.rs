use anyhow::{anyhow, Result};
use fluent_bundle::{FluentArgs, FluentValue};
use std::collections::HashMap;

use crate::i18n::fluent_loader::{Bundle, FluentLoader};
use crate::i18n::language::SupportedLanguage;

/// Named arguments handed to a Fluent message, usually built with [`fluent_args!`]
pub type MessageArgs<'a> = HashMap<String, FluentValue<'a>>;

/// Resolves message keys against the loaded bundles.
///
/// A key missing from the requested language is looked up in the default language
/// before giving up, so a partially translated locale still renders every system
/// message.
pub struct Localizer {
    loader: FluentLoader,
    default_language: SupportedLanguage,
}

impl Localizer {
    pub fn new(loader: FluentLoader, default_language: SupportedLanguage) -> Self {
        Self {
            loader,
            default_language,
        }
    }

    /// Localizer backed only by the translations compiled into the crate
    pub fn embedded(default_language: SupportedLanguage) -> Result<Self> {
        let mut loader = FluentLoader::new();
        for language in SupportedLanguage::all() {
            loader.load_embedded(*language)?;
        }
        Ok(Self::new(loader, default_language))
    }

    fn bundle_with(&self, language: &SupportedLanguage, key: &str) -> Option<&Bundle> {
        [language, &self.default_language]
            .into_iter()
            .filter_map(|lang| self.loader.get_bundle(lang))
            .find(|bundle| bundle.has_message(key))
    }

    /// Format `key` in `language`
    pub fn format(
        &self,
        language: &SupportedLanguage,
        key: &str,
        args: Option<&MessageArgs>,
    ) -> Result<String> {
        let bundle = self
            .bundle_with(language, key)
            .ok_or_else(|| anyhow!("Message not found in {} or {}: {}", language, self.default_language, key))?;

        let pattern = bundle
            .get_message(key)
            .and_then(|message| message.value())
            .ok_or_else(|| anyhow!("Message has no value: {}", key))?;

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(name.as_str(), value.clone());
            }
            fluent_args
        });

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            tracing::warn!("Fluent formatting errors for key '{}': {:?}", key, errors);
        }

        Ok(formatted.into_owned())
    }

    /// Text for `key`, or the key itself when no bundle knows it
    pub fn get_string_for_language(&self, language: &SupportedLanguage, key: &str) -> String {
        self.format(language, key, None)
            .unwrap_or_else(|_| key.to_string())
    }

    /// Same as [`Localizer::get_string_for_language`] with Fluent arguments
    pub fn get_string_with_args_for_language(
        &self,
        language: &SupportedLanguage,
        key: &str,
        args: &MessageArgs,
    ) -> String {
        self.format(language, key, Some(args))
            .unwrap_or_else(|_| key.to_string())
    }

    /// Whether `language` itself carries `key`, without fallback
    pub fn has_message(&self, language: &SupportedLanguage, key: &str) -> bool {
        self.loader
            .get_bundle(language)
            .is_some_and(|bundle| bundle.has_message(key))
    }

    pub fn default_language(&self) -> SupportedLanguage {
        self.default_language
    }
}

/// Builds [`MessageArgs`] from `"name" => value` pairs
#[macro_export]
macro_rules! fluent_args {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut args = std::collections::HashMap::new();
        $(
            args.insert($key.to_string(), fluent_bundle::FluentValue::from($value));
        )*
        args
    }};
}

#[cfg(test)]
#[path = "localizer_test.rs"]
mod tests;
