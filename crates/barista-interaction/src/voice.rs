//! Voice-input seam.
//!
//! Speech-to-text is a platform capability the client consumes, never
//! implements. The controller asks the source to start or cancel a
//! capture; the outcome arrives later as a single discrete `VoiceEvent`.

use barista_core::error::{BaristaError, Result};

/// Terminal outcome of one voice capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// Finalized transcript; replaces the current input draft.
    Transcript(String),
    /// The user denied the microphone permission. Surfaced distinctly.
    PermissionDenied,
    /// Any other recognition error. Handled silently.
    Failed(String),
    /// Capture stopped by explicit user toggle.
    Cancelled,
}

/// Platform speech-to-text capability.
pub trait VoiceInputSource: Send {
    /// Whether the platform offers speech recognition at all.
    fn is_available(&self) -> bool;

    /// Opens a capture. Only called while no capture is active.
    fn start(&mut self) -> Result<()>;

    /// Requests cancellation of the open capture, if any.
    fn cancel(&mut self);
}

/// Stand-in for platforms without speech recognition: reports the
/// capability as unavailable and refuses to start.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableVoiceSource;

impl VoiceInputSource for UnavailableVoiceSource {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self) -> Result<()> {
        Err(BaristaError::voice(
            "speech recognition is not available on this platform",
        ))
    }

    fn cancel(&mut self) {}
}
