//! Persisted login credentials.
//!
//! Two independently keyed values live here: the bearer token string and
//! the serialized user-profile object. They are read at mount to decide
//! whether a logged-in identity exists, written on login or registration,
//! and always cleared together on logout.
//!
//! # Security Note
//!
//! The file is plaintext JSON; it should carry restrictive permissions.
//! Token issuance and verification are entirely backend-owned.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths::BaristaPaths;
use barista_core::error::Result;

/// The two persisted keys. Either may be absent independently on disk,
/// although the client always writes and clears them as a pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(default)]
    pub token: Option<String>,
    /// Opaque serialized profile; the application layer gives it shape.
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

impl StoredCredentials {
    /// True when both a token and a profile are present.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// File-backed storage for `StoredCredentials`.
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    /// Storage at the default location (`credentials.json` under the
    /// config dir).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: BaristaPaths::credentials_file()?,
        })
    }

    /// Storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored credentials. A missing file reads as logged-out
    /// rather than an error; a corrupt file does too, with a warning.
    pub fn load(&self) -> StoredCredentials {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return StoredCredentials::default(),
        };

        match serde_json::from_str(&content) {
            Ok(credentials) => credentials,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "corrupt credentials file, treating as logged out");
                StoredCredentials::default()
            }
        }
    }

    /// Persists the token and profile together.
    pub fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Clears both values together (logout).
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let storage = CredentialStorage::with_path(temp_dir.path().join("credentials.json"));

        let credentials = storage.load();
        assert!(!credentials.is_logged_in());
        assert!(credentials.token.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = CredentialStorage::with_path(temp_dir.path().join("credentials.json"));

        let credentials = StoredCredentials {
            token: Some("token-abc".to_string()),
            user: Some(serde_json::json!({"email": "kim@example.com", "username": "kim"})),
        };
        storage.save(&credentials).unwrap();

        let loaded = storage.load();
        assert!(loaded.is_logged_in());
        assert_eq!(loaded, credentials);
    }

    #[test]
    fn test_clear_removes_both_values() {
        let temp_dir = TempDir::new().unwrap();
        let storage = CredentialStorage::with_path(temp_dir.path().join("credentials.json"));

        storage
            .save(&StoredCredentials {
                token: Some("t".to_string()),
                user: Some(serde_json::json!({"username": "kim"})),
            })
            .unwrap();

        storage.clear().unwrap();
        let loaded = storage.load();
        assert!(loaded.token.is_none());
        assert!(loaded.user.is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = CredentialStorage::with_path(temp_dir.path().join("credentials.json"));
        storage.clear().unwrap();
        storage.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        fs::write(&path, "{ not json").unwrap();

        let storage = CredentialStorage::with_path(path);
        assert!(!storage.load().is_logged_in());
    }
}
