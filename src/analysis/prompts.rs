//! Fixed prompt templates
//!
//! Two natural-language templates, each instructing the model to reply
//! with a single JSON object of a documented shape. No retrieval
//! augmentation; everything the model sees is embedded directly.

/// Builds the repository-analysis prompt
///
/// Embeds the recent commit history and the concatenated file contents and
/// asks for a JSON object with `readme` and `bugs` keys.
pub fn analysis_prompt(commit_history: &str, files_text: &str) -> String {
    format!(
        r#"You are a senior software engineer and an expert in static code analysis.
Your task is to analyze a repository, generate a README.md and identify potential bugs or improvements.

**REPOSITORY DATA:**
1. Recent commit history: {commit_history}
2. Relevant file contents: {files_text}

**TASK:**
Generate a JSON response with TWO keys: "readme" and "bugs".

1. "readme": a string containing a complete README.md in Markdown format.
2. "bugs": an ARRAY of JSON objects. Each object must have the keys: "title", "filepath", "severity" ('Low', 'Medium', 'High'), "type" ('Bug', 'Improvement'), "problem" (a description of the problem), "suggestion" (a suggested fix), "code_before" (the exact code snippet with the problem) and "code_after" (the exact code snippet with the suggested fix).

Respond ONLY with the JSON object."#
    )
}

/// Builds the complexity-analysis prompt for a single code snippet
///
/// Asks for a JSON object with `overall_complexity`, `bottlenecks`, and
/// `suggestions` keys.
pub fn complexity_prompt(code: &str) -> String {
    format!(
        r#"You are a senior software engineer, an expert in algorithm design and performance optimization.
Your task is to analyze the following code snippet and provide a detailed complexity analysis.

Code to analyze:
```
{code}
```

Provide your analysis strictly in the following JSON format, with the keys "overall_complexity", "bottlenecks" and "suggestions".
Output JSON:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_embeds_repository_data() {
        let prompt = analysis_prompt("fix: handle empty list", "--- BEGIN FILE: a.py ---");
        assert!(prompt.contains("fix: handle empty list"));
        assert!(prompt.contains("--- BEGIN FILE: a.py ---"));
        assert!(prompt.contains("\"readme\""));
        assert!(prompt.contains("\"bugs\""));
    }

    #[test]
    fn complexity_prompt_embeds_snippet() {
        let prompt = complexity_prompt("for i in range(n): pass");
        assert!(prompt.contains("for i in range(n): pass"));
        assert!(prompt.contains("overall_complexity"));
    }
}
