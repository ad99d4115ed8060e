//! Client configuration.
//!
//! The source widget shipped in several divergent snapshots (3 vs 4 agent
//! modes, voice input and the insights panel present or not). Those are
//! configuration-time choices here rather than separate builds.

use serde::{Deserialize, Serialize};

use crate::session::AgentMode;

/// Default backend base URL (the dev backend the widget pointed at).
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Default request timeout in seconds for chat sends. The source had no
/// timeout at all, which left a hung request pending forever.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Advisory location tag forwarded with every chat request.
pub const DEFAULT_LOCATION: &str = "main_branch";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Base URL of the chat backend, e.g. `http://localhost:8000/api`.
    pub api_base: String,
    /// Offer the DeepAgents mode (the 4-mode widget) or not (the 3-mode one).
    pub deep_agents_enabled: bool,
    /// Offer voice capture at all.
    pub voice_enabled: bool,
    /// Offer the insights panel at all.
    pub insights_enabled: bool,
    /// Timeout applied to every backend request, in seconds.
    pub request_timeout_secs: u64,
    /// Advisory location forwarded in `user_context`.
    pub location: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            deep_agents_enabled: true,
            voice_enabled: true,
            insights_enabled: true,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl WidgetConfig {
    /// Agent modes offered to the user under this configuration.
    pub fn agent_modes(&self) -> Vec<AgentMode> {
        let mut modes = vec![AgentMode::Modern, AgentMode::Advanced, AgentMode::Workflow];
        if self.deep_agents_enabled {
            modes.push(AgentMode::DeepAgents);
        }
        modes
    }

    /// True when `mode` may be selected under this configuration.
    pub fn allows_mode(&self, mode: AgentMode) -> bool {
        mode != AgentMode::DeepAgents || self.deep_agents_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_offer_the_full_widget() {
        let config = WidgetConfig::default();
        assert_eq!(config.agent_modes().len(), 4);
        assert!(config.voice_enabled);
        assert!(config.insights_enabled);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_three_mode_variant() {
        let config = WidgetConfig {
            deep_agents_enabled: false,
            ..WidgetConfig::default()
        };
        assert_eq!(config.agent_modes().len(), 3);
        assert!(!config.allows_mode(AgentMode::DeepAgents));
        assert!(config.allows_mode(AgentMode::Workflow));
    }

    #[test]
    fn test_toml_partial_override() {
        let config: WidgetConfig =
            toml::from_str("api_base = \"https://cafe.example/api\"\nvoice_enabled = false\n")
                .unwrap();
        assert_eq!(config.api_base, "https://cafe.example/api");
        assert!(!config.voice_enabled);
        // Untouched fields keep their defaults.
        assert!(config.insights_enabled);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }
}
