//! Use cases of the Barista client.
//!
//! `ConversationController` is the conversation state machine behind the
//! chat surface; `AuthSession` ties the auth API to the credential store.

pub mod auth_session;
pub mod conversation;

pub use auth_session::AuthSession;
pub use conversation::{ConversationController, FALLBACK_TEXT};
