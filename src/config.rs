use crate::error::{BookerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Static API key sent alongside the bearer token on every request.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            BookerError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let mut config: Config = toml::from_str(&config_content)?;

        // The API key can be supplied via the environment instead of the
        // config file, so the file can be committed without secrets.
        if let Ok(key) = std::env::var("VENUE_BOOKER_API_KEY") {
            config.api.api_key = Some(key);
        }

        Ok(config)
    }
}
