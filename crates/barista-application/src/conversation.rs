//! The conversation state machine behind the chat surface.
//!
//! `ConversationController` owns the per-mount `SessionState` and mediates
//! every user-initiated action: sending text, selecting the agent mode,
//! model and tier, toggling voice capture, and opening the insights panel.
//! All transitions happen on discrete events; exactly one chat request may
//! be in flight at a time, guarded by the `pending_request` flag.

use tracing::{debug, warn};

use barista_core::catalog::ModelCatalog;
use barista_core::config::WidgetConfig;
use barista_core::error::Result;
use barista_core::insights::{InsightsReport, derive_insights};
use barista_core::message::{ContentBlock, Message};
use barista_core::reasoning::split_reasoning;
use barista_core::session::{AgentMode, SessionState, UserTier};
use barista_interaction::chat::{ChatBackend, ChatRequest, ChatResponse, UserContext};
use barista_interaction::voice::{VoiceEvent, VoiceInputSource};

/// Shown as the single agent turn when a chat send fails for any reason.
pub const FALLBACK_TEXT: &str = "Sorry, I'm having trouble connecting. Please try again.";

/// User-visible notice when the platform has no speech recognition.
pub const VOICE_UNAVAILABLE_NOTICE: &str = "Voice input isn't available on this device.";

/// User-visible notice when the microphone permission was denied.
pub const VOICE_PERMISSION_NOTICE: &str =
    "Microphone access was denied. Check your permission settings to use voice input.";

pub struct ConversationController<B: ChatBackend> {
    config: WidgetConfig,
    /// Mutable per-mount state. Public so the rendering layer can read the
    /// transcript and flags directly; mutation goes through the methods.
    pub state: SessionState,
    backend: B,
    catalog: ModelCatalog,
    voice: Option<Box<dyn VoiceInputSource>>,
    user_email: Option<String>,
    input_draft: String,
}

impl<B: ChatBackend> ConversationController<B> {
    /// Mounts a fresh conversation: new session id, welcome message, empty
    /// catalog. `user_email` is the logged-in identity read from the
    /// credential store at mount, if any.
    pub fn new(config: WidgetConfig, backend: B, user_email: Option<String>) -> Self {
        Self {
            config,
            state: SessionState::new(),
            backend,
            catalog: ModelCatalog::default(),
            voice: None,
            user_email,
            input_draft: String::new(),
        }
    }

    /// Attaches the platform voice-input source.
    pub fn with_voice_source(mut self, source: Box<dyn VoiceInputSource>) -> Self {
        self.voice = Some(source);
        self
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Updates the identity attached to outgoing messages (login/logout
    /// while the surface stays mounted).
    pub fn set_user_email(&mut self, email: Option<String>) {
        self.user_email = email;
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Sends one user message and appends the backend's reply.
    ///
    /// No-op (returns `false`) when the trimmed text is empty or a request
    /// is already pending. The user's turn is appended before any network
    /// activity, so it is visible regardless of the request's outcome. A
    /// failed request is swallowed locally: the transcript gains one agent
    /// turn with the fixed fallback text and the pending flag clears.
    pub async fn send_message(&mut self, raw_text: &str) -> bool {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() || self.state.pending_request {
            return false;
        }

        // Optimistic append: the user's turn is visible before the request
        // is issued.
        let id = self.state.allocate_message_id();
        self.state.append(Message::user(id, raw_text));
        self.input_draft.clear();
        self.state.pending_request = true;

        let request = ChatRequest {
            message: raw_text.to_string(),
            session_id: self.state.session_id.clone(),
            agent_type: self.state.agent_mode.to_string(),
            model_provider: self.state.model_provider.clone(),
            model_name: self.state.model_name.clone(),
            user_email: self.user_email.clone(),
            user_context: UserContext {
                tier: self.state.user_tier.to_string(),
                location: self.config.location.clone(),
            },
        };

        let reply = match self.backend.send_chat(&request).await {
            Ok(response) => {
                let id = self.state.allocate_message_id();
                agent_message_from_response(id, response)
            }
            Err(err) => {
                warn!(%err, "chat send failed, rendering fallback");
                let id = self.state.allocate_message_id();
                Message::agent(id, FALLBACK_TEXT)
            }
        };

        self.state.append(reply);
        self.state.pending_request = false;
        true
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Selects the agent mode. Modes outside the configured set are ignored.
    pub fn select_agent_mode(&mut self, mode: AgentMode) {
        if !self.config.allows_mode(mode) {
            debug!(%mode, "agent mode not offered by this configuration");
            return;
        }
        self.state.agent_mode = mode;
    }

    /// Selects the model provider and resets the model to that provider's
    /// first catalog entry. When the catalog has nothing for the provider
    /// (not yet loaded, or fetch failed), the model name is left unchanged.
    pub fn select_model_provider(&mut self, provider: &str) {
        self.state.model_provider = Some(provider.to_string());
        if let Some(entry) = self.catalog.first_model_for(provider) {
            self.state.model_name = Some(entry.id.clone());
        }
    }

    pub fn select_model_name(&mut self, name: &str) {
        self.state.model_name = Some(name.to_string());
    }

    pub fn select_user_tier(&mut self, tier: UserTier) {
        self.state.user_tier = tier;
    }

    /// Fetches the model catalog. Called once at mount; a failure leaves
    /// the catalog empty and selection controls simply offer no choices.
    pub async fn load_model_catalog(&mut self) {
        match self.backend.fetch_models().await {
            Ok(catalog) => self.catalog = catalog,
            Err(err) => warn!(%err, "model catalog fetch failed, selection disabled"),
        }
    }

    // ========================================================================
    // Voice capture
    // ========================================================================

    /// Toggles voice capture between `Idle` and `Capturing`.
    ///
    /// While idle, starts a capture; a missing capability (or the feature
    /// being configured off) is reported as an error and the state stays
    /// idle. While capturing, always moves toward idle by requesting
    /// cancellation. Two captures can never be open at once.
    pub fn toggle_voice_capture(&mut self) -> Result<()> {
        if self.state.voice_capture_active {
            if let Some(source) = self.voice.as_mut() {
                source.cancel();
            }
            self.state.voice_capture_active = false;
            return Ok(());
        }

        if !self.config.voice_enabled {
            return Err(barista_core::BaristaError::voice(VOICE_UNAVAILABLE_NOTICE));
        }

        let source = self
            .voice
            .as_mut()
            .filter(|s| s.is_available())
            .ok_or_else(|| barista_core::BaristaError::voice(VOICE_UNAVAILABLE_NOTICE))?;

        source.start()?;
        self.state.voice_capture_active = true;
        Ok(())
    }

    /// Consumes the terminal event of a capture. Returns a user-visible
    /// notice for permission denials; other failures are silent. Every
    /// event resets the capture state to idle.
    pub fn on_voice_event(&mut self, event: VoiceEvent) -> Option<String> {
        self.state.voice_capture_active = false;
        match event {
            VoiceEvent::Transcript(text) => {
                self.input_draft = text;
                None
            }
            VoiceEvent::PermissionDenied => Some(VOICE_PERMISSION_NOTICE.to_string()),
            VoiceEvent::Failed(reason) => {
                debug!(%reason, "voice capture failed");
                None
            }
            VoiceEvent::Cancelled => None,
        }
    }

    // ========================================================================
    // Input draft
    // ========================================================================

    pub fn input_draft(&self) -> &str {
        &self.input_draft
    }

    pub fn set_input_draft(&mut self, draft: impl Into<String>) {
        self.input_draft = draft.into();
    }

    /// The text input is disabled while a request is pending or a voice
    /// capture is open.
    pub fn input_locked(&self) -> bool {
        self.state.pending_request || self.state.voice_capture_active
    }

    // ========================================================================
    // Insights
    // ========================================================================

    /// Opens the insights panel. Nothing is snapshotted; the report is
    /// derived from the transcript when read.
    pub fn open_insights(&mut self) {
        if self.config.insights_enabled {
            self.state.insights_open = true;
        }
    }

    pub fn close_insights(&mut self) {
        self.state.insights_open = false;
    }

    /// The current insights report; `None` renders the explicit
    /// "no structured output available" state.
    pub fn insights(&self) -> Option<InsightsReport> {
        derive_insights(&self.state)
    }
}

/// Builds the agent turn for a successful response.
///
/// A delimited reasoning segment takes precedence: the message shows only
/// the main text, as a reasoning block followed by a text block. Otherwise
/// backend-supplied blocks pass through, and when those are absent a single
/// text block is synthesized so an agent turn is never empty.
fn agent_message_from_response(id: u64, response: ChatResponse) -> Message {
    let mut message = match split_reasoning(&response.response) {
        Some(split) => {
            let mut msg = Message::agent(id, split.main_text.clone());
            msg.content_blocks = vec![
                ContentBlock::Reasoning {
                    explanation: split.reasoning,
                },
                ContentBlock::Text {
                    text: split.main_text,
                },
            ];
            msg
        }
        None => {
            let text = response.response.trim().to_string();
            let blocks = match response.content_blocks {
                Some(blocks) if !blocks.is_empty() => blocks,
                _ => vec![ContentBlock::Text { text: text.clone() }],
            };
            let mut msg = Message::agent(id, text);
            msg.content_blocks = blocks;
            msg
        }
    };

    message.structured_output = response.structured_output;
    message.intent = response.intent;
    message.confidence = response.confidence;
    message
}
