//! JSON extraction from free-form model text
//!
//! The model is asked to respond with nothing but a JSON object, yet
//! replies routinely arrive wrapped in prose or Markdown code fences.
//! Extraction scans for the first `{` and the last `}` and parses the
//! enclosed substring. The heuristic is knowingly fragile (prose
//! containing braces can defeat it); keeping it in one pure function means
//! it can be hardened later without touching endpoint logic.

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no JSON object found in model response")]
    NoJsonObject,

    #[error("model response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Extracts the JSON object embedded in a model reply
///
/// Locates the first `{` and the last `}` in the text and parses the
/// substring between them. No schema validation and no repair of
/// near-valid JSON is attempted.
pub fn extract_json(text: &str) -> Result<Value, ExtractionError> {
    let start = text.find('{').ok_or(ExtractionError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ExtractionError::NoJsonObject)?;
    if end < start {
        return Err(ExtractionError::NoJsonObject);
    }

    Ok(serde_json::from_str(&text[start..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object_parses() {
        let value = extract_json(r##"{"readme": "# Hello"}"##).unwrap();
        assert_eq!(value["readme"], "# Hello");
    }

    #[test]
    fn fenced_object_parses() {
        let text = "```json\n{\"overall_complexity\": \"O(n)\"}\n```";
        let value = extract_json(text).unwrap();
        assert_eq!(value["overall_complexity"], "O(n)");
    }

    #[test]
    fn no_braces_is_an_error() {
        assert!(matches!(
            extract_json("no json here"),
            Err(ExtractionError::NoJsonObject)
        ));
    }

    #[test]
    fn reversed_braces_are_an_error() {
        assert!(matches!(
            extract_json("} oops {"),
            Err(ExtractionError::NoJsonObject)
        ));
    }

    #[test]
    fn malformed_object_is_a_parse_error() {
        assert!(matches!(
            extract_json(r#"{"readme": }"#),
            Err(ExtractionError::Parse(_))
        ));
    }

    #[test]
    fn truncated_object_has_no_closing_brace() {
        assert!(matches!(
            extract_json(r#"{"readme": "unterminated"#),
            Err(ExtractionError::NoJsonObject)
        ));
    }
}
