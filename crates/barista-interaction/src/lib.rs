//! Remote collaborators of the Barista client.
//!
//! Everything in this crate talks to something the client does not own:
//! the chat backend over HTTP, the auth and orders endpoints of the same
//! API, and the platform voice-input capability.

pub mod auth;
pub mod chat;
pub mod orders;
pub mod voice;

pub use auth::{AuthBackend, AuthClient, NewUser, Token, UserProfile};
pub use chat::{ChatBackend, ChatRequest, ChatResponse, HttpChatBackend, UserContext};
pub use orders::{OrderRecord, OrdersClient};
pub use voice::{VoiceEvent, VoiceInputSource};
