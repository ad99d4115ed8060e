//! Insights derivation.
//!
//! The insights panel is not stored state: it is a pure projection over the
//! transcript, computed at render time from the most recent agent message
//! carrying structured output. The backend payload is duck-typed on the
//! wire, so every field here is optional and access never fails; a field
//! that is missing or has the wrong shape simply reads as absent.

use serde::Serialize;
use serde_json::Value;

use crate::session::SessionState;

/// Schema of the opaque structured-output payload, with every field
/// optional. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredOutput {
    pub agent_type: Option<String>,
    pub confidence: Option<f64>,
    pub features_used: Option<Vec<String>>,
    pub cart_state: Option<Vec<Value>>,
    pub total: Option<Value>,
}

impl StructuredOutput {
    /// Projects the known fields out of an arbitrary JSON payload.
    /// Missing or mis-shaped fields read as `None`; this never fails.
    pub fn from_value(value: &Value) -> Self {
        Self {
            agent_type: value
                .get("agent_type")
                .and_then(Value::as_str)
                .map(str::to_string),
            confidence: value.get("confidence").and_then(Value::as_f64),
            features_used: value.get("features_used").and_then(Value::as_array).map(
                |items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                },
            ),
            cart_state: value.get("cart_state").and_then(Value::as_array).cloned(),
            total: value.get("total").cloned(),
        }
    }
}

/// Summary of the cart portion of the structured output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CartSummary {
    /// Cart list absent or empty.
    Empty,
    Items { count: usize, total: String },
}

/// Presentation-ready projection of the latest structured output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    /// Agent type label; the backend historically omitted it for the
    /// advanced agent, so that is the default.
    pub agent_type: String,
    /// Confidence as a whole percentage. Absent when the backend omitted
    /// the field or sent a falsy value, zero included.
    pub confidence_pct: Option<u32>,
    /// Feature tags with internal separators rendered as spaces.
    pub features: Vec<String>,
    pub cart: CartSummary,
    /// The payload as received, for the raw-data view.
    pub raw: Value,
}

/// Derives the insights report from the current transcript.
///
/// Scans backward for the first agent message with non-empty structured
/// output. `None` means the panel renders its explicit "no data" state.
pub fn derive_insights(state: &SessionState) -> Option<InsightsReport> {
    let raw = state.latest_structured_output()?;
    let output = StructuredOutput::from_value(raw);

    let confidence_pct = output
        .confidence
        .filter(|c| c.is_finite() && *c != 0.0)
        .map(|c| (c * 100.0).round() as u32);

    let features = output
        .features_used
        .unwrap_or_default()
        .iter()
        .map(|f| f.replace('_', " "))
        .collect();

    let cart = match output.cart_state {
        Some(items) if !items.is_empty() => CartSummary::Items {
            count: items.len(),
            total: format_total(output.total.as_ref()),
        },
        _ => CartSummary::Empty,
    };

    Some(InsightsReport {
        agent_type: output.agent_type.unwrap_or_else(|| "advanced".to_string()),
        confidence_pct,
        features,
        cart,
        raw: raw.clone(),
    })
}

/// The backend sends `total` either as a number or a preformatted string.
fn format_total(total: Option<&Value>) -> String {
    match total {
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| n.to_string()),
        Some(Value::String(s)) => s.clone(),
        _ => "0.00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use serde_json::json;

    fn session_with_output(output: Value) -> SessionState {
        let mut state = SessionState::new();
        let id = state.allocate_message_id();
        let mut msg = Message::agent(id, "here you go");
        msg.structured_output = Some(output);
        state.append(msg);
        state
    }

    #[test]
    fn test_no_structured_output_yields_empty_state() {
        let state = SessionState::new();
        assert!(derive_insights(&state).is_none());
    }

    #[test]
    fn test_full_payload_projection() {
        let state = session_with_output(json!({
            "agent_type": "advanced",
            "confidence": 0.87,
            "features_used": ["structured_output", "custom_middleware"],
            "cart_state": [{"item": "Latte"}, {"item": "Croissant"}],
            "total": 8.0
        }));

        let report = derive_insights(&state).unwrap();
        assert_eq!(report.agent_type, "advanced");
        assert_eq!(report.confidence_pct, Some(87));
        assert_eq!(
            report.features,
            vec!["structured output", "custom middleware"]
        );
        assert_eq!(
            report.cart,
            CartSummary::Items {
                count: 2,
                total: "8.00".to_string()
            }
        );
    }

    #[test]
    fn test_zero_confidence_is_omitted() {
        let state = session_with_output(json!({"confidence": 0.0}));
        let report = derive_insights(&state).unwrap();
        assert_eq!(report.confidence_pct, None);
    }

    #[test]
    fn test_missing_fields_do_not_fail() {
        let state = session_with_output(json!({"something_else": true}));
        let report = derive_insights(&state).unwrap();
        assert_eq!(report.agent_type, "advanced");
        assert_eq!(report.confidence_pct, None);
        assert!(report.features.is_empty());
        assert_eq!(report.cart, CartSummary::Empty);
    }

    #[test]
    fn test_mis_shaped_fields_read_as_absent() {
        let state = session_with_output(json!({
            "confidence": "very high",
            "features_used": "middleware",
            "cart_state": {"not": "a list"}
        }));
        let report = derive_insights(&state).unwrap();
        assert_eq!(report.confidence_pct, None);
        assert!(report.features.is_empty());
        assert_eq!(report.cart, CartSummary::Empty);
    }

    #[test]
    fn test_empty_cart_list_is_empty_state() {
        let state = session_with_output(json!({"cart_state": [], "total": 4.5}));
        let report = derive_insights(&state).unwrap();
        assert_eq!(report.cart, CartSummary::Empty);
    }

    #[test]
    fn test_string_total_passes_through() {
        let state = session_with_output(json!({
            "cart_state": [{"item": "Mocha"}],
            "total": "5.00"
        }));
        let report = derive_insights(&state).unwrap();
        assert_eq!(
            report.cart,
            CartSummary::Items {
                count: 1,
                total: "5.00".to_string()
            }
        );
    }
}
