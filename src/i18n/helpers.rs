use std::sync::Arc;

use crate::i18n::{Localizer, MessageArgs, SupportedLanguage};

/// A localizer pinned to the active language of one view
#[derive(Clone)]
pub struct I18n {
    pub localizer: Arc<Localizer>,
    pub language: SupportedLanguage,
}

impl I18n {
    pub fn new(localizer: Arc<Localizer>, language: SupportedLanguage) -> Self {
        Self {
            localizer,
            language,
        }
    }

    /// Text for `key` in this view's language
    pub fn get(&self, key: &str) -> String {
        self.localizer.get_string_for_language(&self.language, key)
    }

    pub fn get_with_args(&self, key: &str, args: &MessageArgs) -> String {
        self.localizer
            .get_string_with_args_for_language(&self.language, key, args)
    }

    pub fn language(&self) -> SupportedLanguage {
        self.language
    }

    pub fn set_language(&mut self, language: SupportedLanguage) {
        self.language = language;
    }
}
