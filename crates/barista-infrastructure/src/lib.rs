//! Local persistence for the Barista client.
//!
//! Only credentials outlive a session: the bearer token and the serialized
//! user profile. Transcripts are deliberately never persisted.

pub mod config_loader;
pub mod credential_storage;
pub mod paths;

pub use credential_storage::{CredentialStorage, StoredCredentials};
