//! Configuration loading
//!
//! Settings come from `<config dir>/media-flow/config.json`, then from
//! `MFLOW_*` environment variables, then from CLI flags (applied by the
//! binary).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Environment variable overriding the reservation endpoint
pub const ENDPOINT_ENV: &str = "MFLOW_ENDPOINT";
/// Environment variable overriding the account name
pub const ACCOUNT_ENV: &str = "MFLOW_ACCOUNT";

const APP_DIR: &str = "media-flow";
const CONFIG_FILE: &str = "config.json";

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the reservation service
    pub endpoint: Option<Url>,
    /// Account uploads are made for
    pub account: Option<String>,
    /// Most items a single flow may carry
    pub max_items: usize,
    /// Reservation attempts, including the first
    pub max_attempts: u32,
    /// First retry delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Retry delay cap in milliseconds
    pub max_backoff_ms: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            account: None,
            max_items: 10,
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 4000,
            request_timeout_secs: 30,
        }
    }
}

/// Directory holding media-flow's config and token files
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

/// Path of the default config file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE))
}

impl Config {
    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply `MFLOW_*` overrides using `lookup` to read variables
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
            self.endpoint = Some(
                Url::parse(&endpoint)
                    .map_err(|e| Error::Config(format!("{ENDPOINT_ENV}: {e}")))?,
            );
        }
        if let Some(account) = lookup(ACCOUNT_ENV).filter(|v| !v.is_empty()) {
            self.account = Some(account);
        }
        Ok(())
    }

    /// Reject settings that cannot produce a working flow
    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 {
            return Err(Error::Config("max_items must be at least 1".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(Error::Config(
                "initial_backoff_ms must not exceed max_backoff_ms".to_string(),
            ));
        }
        Ok(())
    }
}
