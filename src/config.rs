use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::i18n::SupportedLanguage;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub locale: LocaleConfig,
    pub data: DataConfig,
    pub conversation: ConversationConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
}

#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub default_language: SupportedLanguage,
    pub locales_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Fixture file to seed the repository from; the built-in set is used when unset
    pub fixtures_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConversationConfig {
    pub manager_name: Option<String>,
    pub reopen_allowed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // App configuration
        let app_name = lookup("APP_NAME").unwrap_or_else(|| "Whistlenote".to_string());
        let environment = match lookup("APP_ENVIRONMENT") {
            Some(val) => val
                .parse::<Environment>()
                .map_err(anyhow::Error::msg)
                .context("Failed to parse APP_ENVIRONMENT")?,
            None => Environment::Development,
        };

        // Locale configuration
        let default_language = match lookup("APP_LANGUAGE") {
            Some(val) => val
                .parse::<SupportedLanguage>()
                .map_err(anyhow::Error::msg)
                .context("Failed to parse APP_LANGUAGE")?,
            None => SupportedLanguage::default(),
        };
        let locales_dir = lookup("LOCALES_DIR").unwrap_or_else(|| "locales".to_string());

        // Data configuration
        let fixtures_path = lookup("FIXTURES_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        // Conversation configuration
        let manager_name = lookup("MANAGER_NAME").filter(|n| !n.trim().is_empty());
        let reopen_allowed = match lookup("REPORT_REOPEN_ALLOWED") {
            Some(val) => parse_bool(&val).context("Failed to parse REPORT_REOPEN_ALLOWED")?,
            None => true,
        };

        Ok(Config {
            app: AppConfig {
                name: app_name,
                environment,
            },
            locale: LocaleConfig {
                default_language,
                locales_dir: PathBuf::from(locales_dir),
            },
            data: DataConfig { fixtures_path },
            conversation: ConversationConfig {
                manager_name,
                reopen_allowed,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == Environment::Production
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("expected a boolean, got '{}'", other)),
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" => Ok(Environment::Development),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load the process-wide configuration once
pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
