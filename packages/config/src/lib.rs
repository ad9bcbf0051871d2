// ABOUTME: Configuration loading for Herald
// ABOUTME: Reads the settings name, database URL and admin URL from the environment

pub mod constants;


use std::env;

use thiserror::Error;
use tracing::debug;

use constants::{
    DEFAULT_ADMIN_URL, DEFAULT_DATABASE_URL, DEFAULT_SETTINGS_NAME, HERALD_ADMIN_URL,
    HERALD_DATABASE_URL, HERALD_SETTINGS_NAME,
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid settings name: {0:?}. Must be non-empty and contain no brackets or whitespace")]
    InvalidSettingsName(String),
    #[error("Database URL cannot be empty")]
    EmptyDatabaseUrl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Name of the persisted settings object, also the form field namespace
    pub settings_name: String,
    pub database_url: String,
    /// Base URL of the admin area, used to build the settings page link
    pub admin_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings_name =
            env::var(HERALD_SETTINGS_NAME).unwrap_or_else(|_| DEFAULT_SETTINGS_NAME.to_string());
        validate_settings_name(&settings_name)?;

        let database_url =
            env::var(HERALD_DATABASE_URL).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        if database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }

        let admin_url =
            env::var(HERALD_ADMIN_URL).unwrap_or_else(|_| DEFAULT_ADMIN_URL.to_string());

        debug!(
            "Loaded config: settings_name={}, database_url={}",
            settings_name, database_url
        );

        Ok(Config {
            settings_name,
            database_url,
            admin_url,
        })
    }
}

/// The settings name doubles as a form namespace (`name[key]`), so brackets
/// and whitespace would break field decoding.
pub fn validate_settings_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty()
        || name
            .chars()
            .any(|c| c == '[' || c == ']' || c.is_whitespace())
    {
        return Err(ConfigError::InvalidSettingsName(name.to_string()));
    }
    Ok(())
}
