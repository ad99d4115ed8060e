//! Reasoning-segment extraction.
//!
//! Agent responses may wrap their chain-of-thought in a delimited segment:
//! `[REASONING]...free-form text...[/REASONING]` followed by the answer.
//! This module splits that segment out with an explicit two-token scan
//! rather than a pattern match, so the matching policy stays visible:
//! the first end marker after the start marker wins, and a start marker
//! with no end marker is not a match at all.

/// Start marker of a delimited reasoning segment. Case-sensitive.
pub const REASONING_START: &str = "[REASONING]";
/// End marker of a delimited reasoning segment. Case-sensitive.
pub const REASONING_END: &str = "[/REASONING]";

/// Result of scanning a raw response for a reasoning segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningSplit {
    /// Trimmed interior of the delimited segment.
    pub reasoning: String,
    /// Trimmed remainder of the response after the end marker.
    pub main_text: String,
}

/// Scans `raw` for a delimited reasoning segment.
///
/// Returns `Some(split)` when a start marker is followed by an end marker,
/// with the interior (which may span newlines) as the reasoning and the
/// remainder of the string as the main text. Returns `None` when no start
/// marker is present, or when the start marker has no matching end marker.
pub fn split_reasoning(raw: &str) -> Option<ReasoningSplit> {
    let start = raw.find(REASONING_START)?;
    let interior_start = start + REASONING_START.len();

    // First end marker after the start; none means no match at all.
    let end_offset = raw[interior_start..].find(REASONING_END)?;
    let interior_end = interior_start + end_offset;
    let rest_start = interior_end + REASONING_END.len();

    Some(ReasoningSplit {
        reasoning: raw[interior_start..interior_end].trim().to_string(),
        main_text: raw[rest_start..].trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let split = split_reasoning("[REASONING]thinks here[/REASONING]  final answer  ").unwrap();
        assert_eq!(split.reasoning, "thinks here");
        assert_eq!(split.main_text, "final answer");
    }

    #[test]
    fn test_split_multiline_interior() {
        let raw = "[REASONING]\nstep one\nstep two\n[/REASONING]\nHere is your latte.";
        let split = split_reasoning(raw).unwrap();
        assert_eq!(split.reasoning, "step one\nstep two");
        assert_eq!(split.main_text, "Here is your latte.");
    }

    #[test]
    fn test_no_start_marker() {
        assert_eq!(split_reasoning("just a plain answer"), None);
    }

    #[test]
    fn test_start_without_end_is_not_a_match() {
        assert_eq!(split_reasoning("[REASONING]half a thought and no close"), None);
    }

    #[test]
    fn test_end_before_start_is_not_a_match() {
        assert_eq!(split_reasoning("[/REASONING] oops [REASONING] late"), None);
    }

    #[test]
    fn test_first_end_marker_wins() {
        // Non-greedy: the interior stops at the first end marker.
        let raw = "[REASONING]a[/REASONING]b[/REASONING]c";
        let split = split_reasoning(raw).unwrap();
        assert_eq!(split.reasoning, "a");
        assert_eq!(split.main_text, "b[/REASONING]c");
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert_eq!(split_reasoning("[reasoning]x[/reasoning] y"), None);
    }

    #[test]
    fn test_empty_interior_and_remainder() {
        let split = split_reasoning("[REASONING][/REASONING]").unwrap();
        assert_eq!(split.reasoning, "");
        assert_eq!(split.main_text, "");
    }
}
