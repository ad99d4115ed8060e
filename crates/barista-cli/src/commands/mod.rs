pub mod auth;
pub mod chat;
pub mod orders;

use anyhow::Result;
use barista_core::config::WidgetConfig;
use barista_infrastructure::config_loader;
use barista_infrastructure::credential_storage::CredentialStorage;

/// Effective configuration for this invocation.
pub fn load_config() -> Result<WidgetConfig> {
    Ok(config_loader::load()?)
}

/// Credential store at its default location.
pub fn open_storage() -> Result<CredentialStorage> {
    Ok(CredentialStorage::new()?)
}
