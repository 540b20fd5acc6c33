use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::client::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid API endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Top-level configuration loaded from .gitmentor.toml.
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Analysis endpoint. If None, falls back to GITMENTOR_API_URL, then the built-in default.
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
}

impl Config {
    /// Load configuration from .gitmentor.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".gitmentor.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the analysis endpoint: an explicit override wins, then the
    /// config file, then the GITMENTOR_API_URL env var, then the default.
    pub fn endpoint(&self, cli_override: Option<&str>) -> Result<reqwest::Url, ConfigError> {
        let env_value = std::env::var("GITMENTOR_API_URL").ok();
        self.resolve_endpoint(cli_override, env_value.as_deref())
    }

    fn resolve_endpoint(
        &self,
        cli_override: Option<&str>,
        env_value: Option<&str>,
    ) -> Result<reqwest::Url, ConfigError> {
        let endpoint = cli_override
            .or(self.api.endpoint.as_deref())
            .or(env_value)
            .unwrap_or(DEFAULT_ENDPOINT);

        reqwest::Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn user_agent(&self) -> &str {
        self.api.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
