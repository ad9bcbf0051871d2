// ABOUTME: Herald command line administration
// ABOUTME: Command implementations shared by the herald binary and its tests

pub mod commands;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use herald_config::Config;
use herald_settings::SettingsStore;
use herald_storage::SqliteOptionStore;

/// Open the configured option database and bind the settings object to it
pub async fn open_settings(config: &Config) -> anyhow::Result<SettingsStore> {
    let options = SqliteOptionStore::connect(&config.database_url).await?;
    Ok(SettingsStore::new(
        config.settings_name.clone(),
        Arc::new(options),
    ))
}

/// Install the tracing subscriber; `RUST_LOG` overrides the `info` default
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
