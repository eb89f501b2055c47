use std::time::Duration;

use thiserror::Error;

pub const MAP_TOKEN_ENV_VAR: &str = "WAYPOINT_MAP_TOKEN";
pub const ROUTE_URL_ENV_VAR: &str = "WAYPOINT_ROUTE_URL";
pub const SEARCH_URL_ENV_VAR: &str = "WAYPOINT_SEARCH_URL";
pub const LEG_TIMEOUT_ENV_VAR: &str = "WAYPOINT_LEG_TIMEOUT_SECS";

pub const DEFAULT_ROUTE_URL: &str = "https://api.maphero.io/route/find";
pub const DEFAULT_SEARCH_URL: &str = "https://api.maphero.io/places/search";
pub const DEFAULT_LEG_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sent as the `map-token` header on every request
    pub map_token: String,
    pub route_base_url: String,
    pub search_base_url: String,
    pub leg_timeout: Duration,
}

impl ClientConfig {
    pub fn new(map_token: impl Into<String>) -> Self {
        Self {
            map_token: map_token.into(),
            route_base_url: DEFAULT_ROUTE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_URL.to_string(),
            leg_timeout: DEFAULT_LEG_TIMEOUT,
        }
    }

    /// Reads the configuration from the environment, loading `.env` first if
    /// there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let map_token = lookup(MAP_TOKEN_ENV_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing(MAP_TOKEN_ENV_VAR))?;

        let mut config = ClientConfig::new(map_token);

        if let Some(url) = lookup(ROUTE_URL_ENV_VAR) {
            config.route_base_url = url;
        }

        if let Some(url) = lookup(SEARCH_URL_ENV_VAR) {
            config.search_base_url = url;
        }

        if let Some(value) = lookup(LEG_TIMEOUT_ENV_VAR) {
            let seconds = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: LEG_TIMEOUT_ENV_VAR,
                    value: value.clone(),
                })?;
            config.leg_timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }
}
