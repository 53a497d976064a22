//! Prompt composition and model-reply parsing
//!
//! The model's reply is an untrusted string; [`extract::extract_json`]
//! isolates the brittle text-to-JSON boundary in one pure function. The
//! types below document the reply shapes the prompts ask for. Endpoints
//! intentionally pass the parsed JSON through without schema validation,
//! so a well-formed object lacking expected keys reaches the caller as-is.

pub mod extract;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// The reply shape requested by the analysis prompt
///
/// Documentation of the prompt contract, pinned by the schema tests in
/// this module. Endpoints deliberately do not deserialize into this type:
/// the parsed reply passes through as raw JSON, whatever keys it carries.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Complete README.md in Markdown format
    pub readme: String,
    /// Findings in the order the model reported them
    pub bugs: Vec<BugFinding>,
}

/// A single finding from the analysis prompt
///
/// `severity` is one of `Low`, `Medium`, `High`; `type` is `Bug` or
/// `Improvement`. Both stay plain strings because the model is free to
/// deviate and the values pass through untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct BugFinding {
    pub title: String,
    pub filepath: String,
    pub severity: String,
    #[serde(rename = "type")]
    pub finding_type: String,
    pub problem: String,
    pub suggestion: String,
    pub code_before: String,
    pub code_after: String,
}

/// The reply shape requested by the complexity prompt
///
/// Like [`AnalysisResult`], a contract pin rather than a wire type; the
/// endpoint passes the parsed reply through untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComplexityResult {
    pub overall_complexity: String,
    pub bottlenecks: Vec<String>,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_result_matches_prompt_schema() {
        let reply = serde_json::json!({
            "readme": "# Project\n\nGenerated readme.",
            "bugs": [{
                "title": "Unchecked index",
                "filepath": "src/app.js",
                "severity": "High",
                "type": "Bug",
                "problem": "Index may be out of bounds",
                "suggestion": "Guard the access",
                "code_before": "items[i]",
                "code_after": "if (i < items.length) { items[i] }"
            }]
        });

        let parsed: AnalysisResult = serde_json::from_value(reply).unwrap();
        assert_eq!(parsed.bugs.len(), 1);
        assert_eq!(parsed.bugs[0].severity, "High");
        assert_eq!(parsed.bugs[0].finding_type, "Bug");
    }

    #[test]
    fn complexity_result_matches_prompt_schema() {
        let reply = serde_json::json!({
            "overall_complexity": "O(n^2)",
            "bottlenecks": ["nested loop over items"],
            "suggestions": ["use a hash map for lookups"]
        });

        let parsed: ComplexityResult = serde_json::from_value(reply).unwrap();
        assert_eq!(parsed.overall_complexity, "O(n^2)");
        assert_eq!(parsed.bottlenecks.len(), 1);
    }
}
