//! Config command and flag layering

use anstream::println;
use media_flow::config::Config;
use media_flow::error::Result;
use std::path::Path;
use url::Url;

/// Load config from `path` (or the default location), then env, then flags
pub fn load_config(
    path: Option<&Path>,
    endpoint: Option<Url>,
    account: Option<String>,
) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_overrides(|key| std::env::var(key).ok())?;
            config
        }
        None => Config::load()?,
    };

    if endpoint.is_some() {
        config.endpoint = endpoint;
    }
    if account.is_some() {
        config.account = account;
    }
    Ok(config)
}

/// Print the effective configuration as JSON
pub fn run_config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
