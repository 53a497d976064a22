//! HTTP layer
//!
//! Four JSON endpoints over an axum router. Each request is one sequential
//! chain: locate the repository, fetch data from GitHub, compose a prompt,
//! call the model, extract JSON from the reply, respond. No shared mutable
//! state beyond the read-only [`AppState`] built once at startup.

mod error;

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::analysis::extract::extract_json;
use crate::analysis::prompts::{analysis_prompt, complexity_prompt};
use crate::auth::resolve_token;
use crate::gemini::GeminiClient;
use crate::github::{GithubClient, GithubError, RepositoryRef, COMMIT_HISTORY_LIMIT};

pub use error::{ApiError, Result};

/// Commit message used when the caller does not supply one
const DEFAULT_COMMIT_MESSAGE: &str = "docs: update README.md by DocSync AI";

/// Path of the file written by `/commit`
const README_PATH: &str = "README.md";

/// Process-wide configuration, established once at startup and read-only
/// thereafter
#[derive(Clone)]
pub struct AppState {
    http: reqwest::Client,
    github_token: Option<String>,
    github_api_base: String,
    model: Option<GeminiClient>,
}

impl AppState {
    pub fn new(github_token: Option<String>, model: Option<GeminiClient>) -> Self {
        Self::with_github_api_base(github_token, model, crate::github::DEFAULT_API_BASE)
    }

    /// Builds state against a custom GitHub API base URL (used by tests)
    pub fn with_github_api_base(
        github_token: Option<String>,
        model: Option<GeminiClient>,
        github_api_base: impl Into<String>,
    ) -> Self {
        AppState {
            http: reqwest::Client::new(),
            github_token,
            github_api_base: github_api_base.into(),
            model,
        }
    }

    fn github_client(&self, token: String) -> GithubClient {
        GithubClient::with_api_base(self.http.clone(), Some(token), self.github_api_base.clone())
    }

    fn model(&self) -> Result<&GeminiClient> {
        self.model
            .as_ref()
            .ok_or_else(|| ApiError::Internal("The AI model is not initialized.".to_string()))
    }

    fn resolve_token(&self, user_token: Option<&str>) -> Result<String> {
        resolve_token(user_token, self.github_token.as_deref()).ok_or_else(|| {
            ApiError::Unauthorized(
                "No GitHub token available. Provide one in the request or configure a server default.".to_string(),
            )
        })
    }
}

/// Builds the application router
///
/// CORS is permissive: the reference frontend is a static page served from
/// another origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/analyze-complexity", post(analyze_complexity))
        .route("/commit", post(commit))
        .route("/pull-request", post(pull_request))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    repo_url: Option<String>,
    github_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ComplexityRequest {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitRequest {
    repo_url: Option<String>,
    readme_content: Option<String>,
    github_token: Option<String>,
    commit_message: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommitResponse {
    success: bool,
    message: String,
    url: String,
}

/// Handles `POST /analyze`: full repository analysis
///
/// Fetches recent commits and relevant file contents from the first branch
/// the API reports, sends everything to the model, and passes the parsed
/// reply through as the response body.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<Value>> {
    let model = state.model()?;

    let repo_url = body
        .repo_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Repository URL is required.".to_string()))?;
    let repo = RepositoryRef::parse(repo_url)
        .ok_or_else(|| ApiError::BadRequest("Invalid repository URL.".to_string()))?;
    let token = state.resolve_token(body.github_token.as_deref())?;

    let github = state.github_client(token);
    let branches = github.list_branches(&repo).await?;
    let primary_branch = branches
        .first()
        .ok_or_else(|| ApiError::NotFound("No branches found.".to_string()))?;

    // First branch returned is treated as the primary branch. A simplifying
    // policy, not an actual default-branch lookup.
    tracing::info!("analyzing primary branch '{}' of {}", primary_branch, repo);

    let commit_history = github
        .list_commit_messages(&repo, primary_branch, COMMIT_HISTORY_LIMIT)
        .await
        .join("\n");
    let files_text = github.collect_file_contents(&repo, primary_branch).await;

    if commit_history.is_empty() && files_text.is_empty() {
        return Err(ApiError::NotFound(
            "No commits or source files found to analyze.".to_string(),
        ));
    }

    tracing::info!("sending repository data to the model for analysis");
    let reply = model
        .generate_content(&analysis_prompt(&commit_history, &files_text))
        .await
        .map_err(|e| {
            tracing::error!("model call failed: {}", e);
            ApiError::Internal("Failed to generate analysis.".to_string())
        })?;

    let analysis = extract_json(&reply).map_err(|e| {
        tracing::error!("could not extract JSON from model reply: {}; raw reply: {}", e, reply);
        ApiError::Internal("The AI response was not in the expected format.".to_string())
    })?;

    tracing::info!("analysis for {} complete", repo);
    Ok(Json(analysis))
}

/// Handles `POST /analyze-complexity`: complexity analysis of a single snippet
async fn analyze_complexity(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ComplexityRequest>,
) -> Result<Json<Value>> {
    let model = state.model()?;

    let code = body
        .code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("No code snippet provided.".to_string()))?;

    let reply = model
        .generate_content(&complexity_prompt(code))
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to generate analysis: {}", e)))?;

    let analysis = extract_json(&reply).map_err(|e| {
        tracing::error!("could not extract JSON from model reply: {}; raw reply: {}", e, reply);
        ApiError::Internal("The AI response was not in the expected format.".to_string())
    })?;

    Ok(Json(analysis))
}

/// Handles `POST /commit`: writes the generated README.md back to the repository
///
/// Looks up the current SHA of `README.md` first: a 404 means "create
/// new", so the SHA is omitted from the upsert payload; when the file
/// exists its SHA must be included or GitHub rejects the update.
async fn commit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CommitRequest>,
) -> Result<Json<CommitResponse>> {
    let repo_url = body
        .repo_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Repository URL is required.".to_string()))?;
    let readme_content = body
        .readme_content
        .as_deref()
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ApiError::BadRequest("README content is required.".to_string()))?;

    let repo = RepositoryRef::parse(repo_url)
        .ok_or_else(|| ApiError::BadRequest("Invalid repository URL.".to_string()))?;
    let token = state.resolve_token(body.github_token.as_deref())?;
    let message = body.commit_message.as_deref().unwrap_or(DEFAULT_COMMIT_MESSAGE);

    let github = state.github_client(token);
    let sha = github
        .find_file_sha(&repo, README_PATH)
        .await
        .map_err(commit_error)?;
    let url = github
        .upsert_file(&repo, README_PATH, readme_content, message, sha.as_deref())
        .await
        .map_err(commit_error)?;

    tracing::info!("committed {} to {}", README_PATH, repo);
    Ok(Json(CommitResponse {
        success: true,
        message: format!("{} committed successfully.", README_PATH),
        url,
    }))
}

/// Error mapping for the write path: bad credentials stay a 401, anything
/// else upstream is a 500
fn commit_error(err: GithubError) -> ApiError {
    match err {
        GithubError::Unauthorized => ApiError::Unauthorized(err.to_string()),
        other => ApiError::Internal(format!("Failed to commit file: {}", other)),
    }
}

/// Handles `POST /pull-request`: reserved, not implemented
async fn pull_request() -> ApiError {
    ApiError::NotImplemented("Pull request creation is not implemented.".to_string())
}
