pub mod fluent_loader;
pub mod helpers;
pub mod language;
pub mod localizer;

pub use fluent_loader::FluentLoader;
pub use helpers::I18n;
pub use language::SupportedLanguage;
pub use localizer::{Localizer, MessageArgs};

use anyhow::Result;

use crate::config::Config;

/// Initialize the i18n system for every supported language
pub fn init_i18n(config: &Config) -> Result<Localizer> {
    let mut loader = FluentLoader::new();

    for language in SupportedLanguage::all() {
        loader.load_locale(*language, &config.locale.locales_dir)?;
    }

    Ok(Localizer::new(loader, config.locale.default_language))
}
