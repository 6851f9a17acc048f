use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::ConfigError;
use crate::football_api::DEFAULT_MAX_RETRY_WAIT;

pub const DEFAULT_FOOTBALL_API_BASE_URL: &str = "https://api.football-data.org/v2";

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub football_api_base_url: String,
    pub football_api_token: String,
    pub football_api_timeout: Option<Duration>,
    /// Longest `X-RequestCounter-Reset` wait the client will sleep for
    pub football_api_max_retry_wait: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let host: Ipv4Addr = match lookup("HOST") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name: "HOST", value })?,
            None => Ipv4Addr::UNSPECIFIED,
        };

        let port: u16 = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => 8080,
        };

        let football_api_token =
            lookup("FOOTBALL_API_TOKEN").ok_or(ConfigError::Missing("FOOTBALL_API_TOKEN"))?;

        let football_api_base_url = lookup("FOOTBALL_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_FOOTBALL_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let football_api_timeout = match lookup("FOOTBALL_API_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value.parse().map_err(|_| ConfigError::Invalid {
                    name: "FOOTBALL_API_TIMEOUT_SECS",
                    value,
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let football_api_max_retry_wait = match lookup("FOOTBALL_API_MAX_RETRY_WAIT_SECS") {
            Some(value) => {
                let secs: u64 = value.parse().map_err(|_| ConfigError::Invalid {
                    name: "FOOTBALL_API_MAX_RETRY_WAIT_SECS",
                    value,
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_MAX_RETRY_WAIT,
        };

        Ok(Config {
            database_url,
            listen_addr: SocketAddr::from((host, port)),
            football_api_base_url,
            football_api_token,
            football_api_timeout,
            football_api_max_retry_wait,
        })
    }
}
