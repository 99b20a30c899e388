use crate::store::RemoteConfig;
use std::{env, path::PathBuf, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TABLE: &str = "chart_records";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("STORE_API_KEY must be set when STORE_URL is set")]
    MissingApiKey,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub session_path: PathBuf,
    /// When set, records live in the hosted table instead of `data_path`.
    pub remote: Option<RemoteConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/records.json"));
        let session_path = lookup("APP_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/session.json"));

        let remote = match lookup("STORE_URL").filter(|url| !url.trim().is_empty()) {
            Some(base_url) => {
                let api_key = lookup("STORE_API_KEY").ok_or(ConfigError::MissingApiKey)?;
                let table = lookup("STORE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());
                let timeout = lookup("STORE_TIMEOUT_SECS")
                    .and_then(|value| value.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS);
                Some(RemoteConfig {
                    base_url,
                    api_key,
                    table,
                    timeout: Duration::from_secs(timeout),
                })
            }
            None => None,
        };

        Ok(Self {
            port,
            data_path,
            session_path,
            remote,
        })
    }
}
