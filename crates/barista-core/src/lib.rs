pub mod catalog;
pub mod config;
pub mod error;
pub mod insights;
pub mod message;
pub mod reasoning;
pub mod session;

// Re-export common error type
pub use error::BaristaError;
