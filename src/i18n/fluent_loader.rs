use anyhow::{Context, Result};
use fluent_bundle::{concurrent::FluentBundle, FluentResource};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::i18n::language::SupportedLanguage;

pub type Bundle = FluentBundle<FluentResource>;

const KOREAN_DEFAULTS: &str = include_str!("../../locales/ko/conversation.ftl");
const ENGLISH_DEFAULTS: &str = include_str!("../../locales/en/conversation.ftl");

/// Loads and manages Fluent translation resources
pub struct FluentLoader {
    bundles: HashMap<SupportedLanguage, Bundle>,
}

impl FluentLoader {
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }

    /// Load all FTL files for a locale from `<locales_dir>/<code>/`.
    ///
    /// Falls back to the embedded defaults when the directory is missing or holds no
    /// `.ftl` files.
    pub fn load_locale(&mut self, language: SupportedLanguage, locales_dir: &Path) -> Result<()> {
        let locale_dir = locales_dir.join(language.code());
        let mut sources = Vec::new();

        if locale_dir.is_dir() {
            let paths = fs::read_dir(&locale_dir)
                .with_context(|| format!("Failed to read locale directory: {:?}", locale_dir))?;

            for path in paths {
                let path = path?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("ftl") {
                    let content = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read file: {:?}", path))?;
                    sources.push((path.display().to_string(), content));
                }
            }
        }

        if sources.is_empty() {
            tracing::debug!(
                "No FTL files under {:?}, using embedded defaults for {}",
                locale_dir,
                language.code()
            );
            return self.load_embedded(language);
        }

        let loaded_files = sources.len();
        let bundle = build_bundle(language, sources)?;
        tracing::info!("Loaded {} FTL files for locale {}", loaded_files, language.code());

        self.bundles.insert(language, bundle);
        Ok(())
    }

    /// Load the translations compiled into the crate
    pub fn load_embedded(&mut self, language: SupportedLanguage) -> Result<()> {
        let content = match language {
            SupportedLanguage::Korean => KOREAN_DEFAULTS,
            SupportedLanguage::English => ENGLISH_DEFAULTS,
        };
        let bundle = build_bundle(
            language,
            vec![(format!("embedded:{}", language.code()), content.to_string())],
        )?;
        self.bundles.insert(language, bundle);
        Ok(())
    }

    /// Get a bundle for a specific language
    pub fn get_bundle(&self, language: &SupportedLanguage) -> Option<&Bundle> {
        self.bundles.get(language)
    }
}

impl Default for FluentLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn build_bundle(language: SupportedLanguage, sources: Vec<(String, String)>) -> Result<Bundle> {
    let mut bundle = FluentBundle::new_concurrent(vec![language.lang_id()]);
    // system messages are plain text, not mixed-direction UI
    bundle.set_use_isolating(false);

    for (origin, content) in sources {
        let resource = FluentResource::try_new(content).map_err(|(_, errors)| {
            anyhow::anyhow!("Failed to parse FTL file {}: {:?}", origin, errors)
        })?;

        bundle.add_resource(resource).map_err(|errors| {
            anyhow::anyhow!("Failed to add resource {} to bundle: {:?}", origin, errors)
        })?;
    }

    Ok(bundle)
}
