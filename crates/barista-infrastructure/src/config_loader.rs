//! Client configuration loading.
//!
//! Overrides come from `config.toml` under the config dir; a missing file
//! means pure defaults. The `BARISTA_API_URL` environment variable wins
//! over both for the backend base URL.

use std::fs;
use std::path::Path;

use barista_core::config::WidgetConfig;
use barista_core::error::Result;

use crate::paths::BaristaPaths;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "BARISTA_API_URL";

/// Loads the effective configuration from the default location.
pub fn load() -> Result<WidgetConfig> {
    let path = BaristaPaths::config_file()?;
    let mut config = load_from_path(&path)?;
    apply_env_override(&mut config, std::env::var(API_URL_ENV).ok());
    Ok(config)
}

/// Loads configuration from an explicit path; missing file means defaults.
pub fn load_from_path(path: &Path) -> Result<WidgetConfig> {
    if !path.exists() {
        return Ok(WidgetConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded config overrides");
    Ok(config)
}

/// Applies the base-URL environment override when set and non-empty.
pub fn apply_env_override(config: &mut WidgetConfig, api_url: Option<String>) {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api_base = url;
    }
}
