use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::Config;

/// Logging setup for the desk process
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    /// Filter directive used when `RUST_LOG` is not set
    pub default_filter: String,
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
            default_filter: format!("{}=info", env!("CARGO_CRATE_NAME")),
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Development logs conversation mutations at debug level; production keeps to info
    /// and drops color codes.
    pub fn from_config(config: &Config) -> Self {
        let production = config.is_production();
        let level = if production { "info" } else { "debug" };
        Self {
            service_name: config.app.name.clone(),
            environment: config.app.environment.as_str().to_string(),
            default_filter: format!("{}={}", env!("CARGO_CRATE_NAME"), level),
            ansi: !production,
            ..Self::default()
        }
    }
}

/// Install the global tracing subscriber. Logs go to stderr so the console output
/// stays clean.
pub fn init_telemetry(config: Option<TelemetryConfig>) -> Result<()> {
    let config = config.unwrap_or_default();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    Registry::default()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = %config.environment,
        "Logging initialized"
    );
    Ok(())
}
