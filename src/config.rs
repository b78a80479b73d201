//! Process configuration for the APOD viewer
//!
//! The NASA API key is the only required configuration. It is read from the
//! environment, with `.env` files honored for local development.

use std::env;

use thiserror::Error;

/// Environment variable holding the NASA API key
const API_KEY_VAR: &str = "NASA_API_KEY";

/// Errors that can occur while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key present in the environment or a .env file
    #[error("NASA_API_KEY is not set; export it or add it to a .env file")]
    MissingApiKey,
}

/// Runtime configuration resolved at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// NASA API key sent with every fetch
    pub api_key: String,
}

impl Config {
    /// Reads configuration from the environment
    ///
    /// Loads a `.env` file from the working directory first if one exists.
    /// An unset or empty `NASA_API_KEY` is a startup error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self { api_key })
    }
}
