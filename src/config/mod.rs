mod types;

pub use types::*;

use anyhow::{Context, Result};
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let config = read_config(path)?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    load_config_with_api_key(custom_path, None)
}

/// Like [`load_config_or_default`], with an API key from the command line
/// or environment replacing the file's before validation.
pub fn load_config_with_api_key(
    custom_path: Option<&Path>,
    api_key: Option<String>,
) -> Result<Config> {
    let mut config = match locate_config(custom_path) {
        Some(path) => read_config(&path)?,
        None => Config::default(),
    };

    if let Some(key) = api_key {
        config.catalog.api_key = key;
    }

    validate_config(&config)?;

    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// The explicit path if given, else the first default location that exists.
fn locate_config(custom_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = custom_path {
        return Some(path.to_path_buf());
    }

    let default_paths = [
        "./reelposter.toml",
        "./config.toml",
        "~/.config/reelposter/config.toml",
        "/etc/reelposter/config.toml",
    ];

    for path_str in default_paths {
        let path = PathBuf::from(shellexpand::tilde(path_str).as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return Some(path);
        }
    }

    None
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.catalog.timeout_secs == 0 {
        anyhow::bail!("catalog.timeout_secs must be greater than 0");
    }
    if config.catalog.requests_per_second == 0 {
        anyhow::bail!("catalog.requests_per_second must be greater than 0");
    }
    if config.resolver.concurrency == 0 {
        anyhow::bail!("resolver.concurrency must be greater than 0");
    }

    check_url("catalog.base_url", &config.catalog.base_url)?;
    check_url("artwork.image_base_url", &config.artwork.image_base_url)?;
    check_url("artwork.fallback_url", &config.artwork.fallback_url)?;

    if config.artwork.poster_size.trim_matches('/').is_empty() {
        anyhow::bail!("artwork.poster_size cannot be empty");
    }

    config
        .scoring
        .validate()
        .map_err(|e| anyhow::anyhow!("scoring: {}", e))?;

    if config.cache.enabled && config.cache.max_entries == 0 {
        tracing::warn!("cache.max_entries is 0; nothing will be cached");
    }

    Ok(())
}

fn check_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", field, value))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{} must be an http(s) URL: {}", field, value);
    }
    Ok(())
}
