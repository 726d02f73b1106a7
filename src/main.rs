use anyhow::Context;
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use tracing::info;

use whistlenote::i18n::init_i18n;
use whistlenote::media::InMemoryMediaStore;
use whistlenote::repository::{Fixtures, InMemoryRepository};
use whistlenote::telemetry::{init_telemetry, TelemetryConfig};
use whistlenote::{config, AppState};

mod console;

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = config::init().context("Failed to load configuration")?;

    init_telemetry(Some(TelemetryConfig::from_config(config)))?;

    let localizer = init_i18n(config).context("Failed to load translations")?;

    let fixtures = match &config.data.fixtures_path {
        Some(path) => Fixtures::load(path)
            .with_context(|| format!("Failed to load fixtures from {:?}", path))?,
        None => Fixtures::builtin().context("Failed to load built-in fixtures")?,
    };
    info!(
        sites = fixtures.sites.len(),
        reports = fixtures.reports.len(),
        rewards = fixtures.rewards.len(),
        "Loaded fixtures"
    );

    let state = AppState::new(
        Arc::new(InMemoryRepository::new(fixtures)),
        Arc::new(InMemoryMediaStore::new()),
        Arc::new(localizer),
    )
    .configured(config);

    info!("{} ready", config.app.name);

    let stdin = io::stdin();
    let stdout = io::stdout();
    console::Console::new(&state, stdout.lock()).run(stdin.lock())
}
