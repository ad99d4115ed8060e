//! Well-known file locations under the user's config directory.

use std::path::PathBuf;

use barista_core::error::{BaristaError, Result};

/// Path helpers rooted at `~/.config/barista` (platform equivalent).
pub struct BaristaPaths;

impl BaristaPaths {
    /// The client's config directory. Not created here; callers create it
    /// on first write.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("barista"))
            .ok_or_else(|| BaristaError::config("could not determine config directory"))
    }

    /// Persisted credentials (bearer token + user profile).
    pub fn credentials_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("credentials.json"))
    }

    /// Optional client configuration overrides.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
