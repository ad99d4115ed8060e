//! Model catalog fetched from the backend at mount.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One selectable model as the backend advertises it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub name: String,
}

/// Provider name mapped to its ordered list of models.
///
/// Empty when the catalog fetch failed; selection controls then offer no
/// choices but nothing else is blocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub models: BTreeMap<String, Vec<ModelEntry>>,
}

impl ModelCatalog {
    /// Providers in stable order.
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// First catalog entry for a provider, used as the default model when
    /// the provider is selected.
    pub fn first_model_for(&self, provider: &str) -> Option<&ModelEntry> {
        self.models.get(provider).and_then(|entries| entries.first())
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_models_response() {
        let json = r#"{
            "models": {
                "gemini": [{"id": "g1", "name": "Gemini Flash"}],
                "openai": [
                    {"id": "gpt-a", "name": "GPT A"},
                    {"id": "gpt-b", "name": "GPT B"}
                ]
            }
        }"#;

        let catalog: ModelCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.first_model_for("gemini").unwrap().id, "g1");
        assert_eq!(catalog.first_model_for("openai").unwrap().id, "gpt-a");
        assert!(catalog.first_model_for("anthropic").is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ModelCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.providers().count(), 0);
    }
}
