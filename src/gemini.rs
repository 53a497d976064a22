//! Gemini API client
//!
//! A thin wrapper over the `generateContent` endpoint of the Google
//! generative-language API. One prompt in, one block of free-form text out.
//! Single blocking call per request, no retry, and deliberately no timeout:
//! model latency is unbounded while the GitHub calls use a fixed short one.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Default base URL for the generative-language API
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for every analysis request
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("Gemini request failed: {0}")]
    Network(String),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No content in Gemini response")]
    EmptyResponse,
}

/// Client for the Gemini `generateContent` endpoint
///
/// Built once at process start. Endpoints hold it behind an `Option`: when
/// the API key is missing at startup there is no client at all, and every
/// model-backed endpoint reports an explicit "not initialized" error.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_api_base(client, api_key, DEFAULT_API_BASE)
    }

    /// Creates a client against a custom API base URL (used by tests)
    pub fn with_api_base(client: Client, api_key: String, api_base: impl Into<String>) -> Self {
        GeminiClient {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_base: api_base.into(),
        }
    }

    /// Sends a prompt to the model and returns the raw text reply
    ///
    /// # Errors
    ///
    /// * `GeminiError::Network` when the request itself fails
    /// * `GeminiError::Api` for a non-2xx status or an unparseable body
    /// * `GeminiError::EmptyResponse` when the reply carries no candidate text
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );

        let body = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let reply: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| GeminiError::Api {
                status: status.as_u16(),
                message: format!("Failed to parse Gemini response: {}", e),
            })?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or(GeminiError::EmptyResponse)
    }
}
