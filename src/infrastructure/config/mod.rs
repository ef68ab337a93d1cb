use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::Result;

pub const CONFIG_FILE_ENV: &str = "BRENT_API_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "brent-api.toml";
pub const ENV_PREFIX: &str = "BRENT_API_";

/// Process-wide settings. Fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Brent daily prices (`Date`, `Price` columns)
    pub prices_path: PathBuf,
    /// Curated market events (`event_date` plus free-form columns)
    pub events_path: PathBuf,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            prices_path: PathBuf::from("../data/raw/BrentOilPrices.csv"),
            events_path: PathBuf::from("../data/events/brent_key_events.csv"),
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults, then the TOML file (if present), then `BRENT_API_*` variables.
    pub fn figment() -> Figment {
        let config_file =
            std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    pub fn load() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
