//! Authentication for the reservation service
//!
//! Supports an environment variable and a token file in the config dir.

use crate::config::config_dir;
use crate::error::{Error, Result};
use crate::types::ConnectionHandle;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "MFLOW_TOKEN";

const TOKEN_FILE: &str = "token";

/// Source of authentication token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from a file on disk
    File(PathBuf),
}

/// Resolved credentials
#[derive(Clone)]
pub struct AuthConfig {
    /// Bearer token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

impl AuthConfig {
    /// Build the connection handle reservations are made with
    pub fn connection(&self, account: impl Into<String>) -> ConnectionHandle {
        ConnectionHandle {
            account: account.into(),
            token: self.token.clone(),
        }
    }
}

/// Get authentication
///
/// Priority:
/// 1. `MFLOW_TOKEN` environment variable
/// 2. `<config dir>/media-flow/token`
pub fn get_auth() -> Result<AuthConfig> {
    if let Some(token) = env::var(TOKEN_ENV).ok().and_then(|t| non_empty(&t)) {
        return Ok(AuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    if let Some(path) = config_dir().map(|d| d.join(TOKEN_FILE)) {
        if let Some(token) = read_token_file(&path)? {
            return Ok(AuthConfig {
                token,
                source: AuthSource::File(path),
            });
        }
    }

    Err(Error::Auth(format!(
        "No token found. Set {TOKEN_ENV} or run `mflow auth setup`"
    )))
}

/// Read a token file; `None` if it is missing or blank
pub fn read_token_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(non_empty(&contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
