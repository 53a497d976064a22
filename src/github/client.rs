use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};

use super::RepositoryRef;

/// Default base URL for the GitHub REST API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Fixed timeout applied to every GitHub API request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "docsync/0.1.0 (https://github.com/docsync-ai/docsync)";

/// How many recent commit messages are embedded in the analysis prompt
pub const COMMIT_HISTORY_LIMIT: u8 = 5;

/// Cap on the number of source files fetched for analysis
///
/// The tree listing may match far more files; only the first
/// `MAX_ANALYZED_FILES` in listing order are fetched, the rest are never
/// requested.
pub const MAX_ANALYZED_FILES: usize = 10;

/// File extensions considered relevant for repository analysis
const SOURCE_EXTENSIONS: &[&str] = &[
    ".js", ".py", ".html", ".css", ".java", ".go", ".rb", ".php", ".ts",
];

/// Errors from the GitHub API client
///
/// The variants carry the distinctions the HTTP layer needs for status
/// mapping: missing repository, bad credentials, any other API failure,
/// and transport-level failures.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("Repository not found. Check the URL.")]
    RepositoryNotFound,

    #[error("Unauthorized access. Check your GitHub token.")]
    Unauthorized,

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Connection error: {0}")]
    Network(String),
}

/// Client for the GitHub REST API
///
/// Holds a shared `reqwest::Client`, an optional authentication token, and
/// the API base URL. The base URL defaults to [`DEFAULT_API_BASE`] and is
/// injectable so tests can point the client at a mock server.
pub struct GithubClient {
    client: Client,
    token: Option<String>,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct BranchItem {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    entry_type: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct BlobResponse {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ContentsItem {
    sha: String,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct UpsertResponse {
    content: UpsertedContent,
}

#[derive(Debug, Deserialize)]
struct UpsertedContent {
    html_url: String,
}

impl GithubClient {
    pub fn new(client: Client, token: Option<String>) -> Self {
        Self::with_api_base(client, token, DEFAULT_API_BASE)
    }

    /// Creates a client against a custom API base URL (used by tests)
    pub fn with_api_base(
        client: Client,
        token: Option<String>,
        api_base: impl Into<String>,
    ) -> Self {
        GithubClient {
            client,
            token,
            api_base: api_base.into(),
        }
    }

    /// Builds a request with the standard GitHub headers and timeout
    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let mut req_builder = self
            .client
            .request(method, url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github.v3+json")
            .timeout(REQUEST_TIMEOUT);

        if let Some(token) = &self.token {
            req_builder = req_builder.header("Authorization", format!("token {}", token));
        }

        req_builder
    }

    /// Lists branch names for a repository
    ///
    /// Calls the branch-listing endpoint and returns the branch names in
    /// the order the API reports them. The caller treats the first branch
    /// as the primary one.
    ///
    /// # Errors
    ///
    /// * `GithubError::RepositoryNotFound` when the API answers 404
    /// * `GithubError::Unauthorized` when the API answers 401
    /// * `GithubError::Api` for any other non-2xx status
    /// * `GithubError::Network` when the request itself fails
    pub async fn list_branches(&self, repo: &RepositoryRef) -> Result<Vec<String>, GithubError> {
        let url = format!("{}/repos/{}/{}/branches", self.api_base, repo.owner, repo.name);

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| GithubError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                404 => GithubError::RepositoryNotFound,
                401 => GithubError::Unauthorized,
                code => {
                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    GithubError::Api {
                        status: code,
                        message,
                    }
                }
            });
        }

        let branches: Vec<BranchItem> = response.json().await.map_err(|e| GithubError::Api {
            status: status.as_u16(),
            message: format!("Failed to parse branch list: {}", e),
        })?;

        Ok(branches.into_iter().map(|b| b.name).collect())
    }

    /// Fetches the most recent commit messages on a branch
    ///
    /// Best effort: any failure, transport or otherwise, yields an empty
    /// vector so the analysis can proceed on file contents alone.
    pub async fn list_commit_messages(
        &self,
        repo: &RepositoryRef,
        branch: &str,
        limit: u8,
    ) -> Vec<String> {
        let url = format!(
            "{}/repos/{}/{}/commits?sha={}&per_page={}",
            self.api_base,
            repo.owner,
            repo.name,
            urlencoding::encode(branch),
            limit
        );

        let response = match self.request(Method::GET, url).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                tracing::debug!(
                    "commit listing for {} returned {}, skipping history",
                    repo,
                    resp.status()
                );
                return Vec::new();
            }
            Err(e) => {
                tracing::debug!("commit listing for {} failed: {}", repo, e);
                return Vec::new();
            }
        };

        match response.json::<Vec<CommitItem>>().await {
            Ok(commits) => commits.into_iter().map(|c| c.commit.message).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Gathers the contents of relevant source files on a branch
    ///
    /// Lists the branch's file tree recursively, filters to the fixed
    /// extension allow-list, and fetches at most [`MAX_ANALYZED_FILES`]
    /// blobs sequentially, in listing order. Each blob is base64-decoded
    /// and concatenated into one text block with per-file delimiters.
    ///
    /// Failure policy mirrors the endpoint's best-effort nature: a non-200
    /// tree response yields an empty string, and files that fail to decode
    /// are silently omitted.
    pub async fn collect_file_contents(&self, repo: &RepositoryRef, branch: &str) -> String {
        tracing::debug!("fetching file tree of branch '{}'", branch);
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base,
            repo.owner,
            repo.name,
            urlencoding::encode(branch)
        );

        let response = match self.request(Method::GET, url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("failed to fetch file tree: {}", e);
                return String::new();
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            tracing::warn!("file tree listing returned {}", response.status());
            return String::new();
        }

        let tree: TreeResponse = match response.json().await {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!("failed to parse file tree: {}", e);
                return String::new();
            }
        };

        let relevant: Vec<&TreeEntry> = tree
            .tree
            .iter()
            .filter(|entry| {
                entry.entry_type == "blob"
                    && SOURCE_EXTENSIONS.iter().any(|ext| entry.path.ends_with(ext))
            })
            .collect();

        tracing::debug!(
            "found {} relevant files, analyzing up to {}",
            relevant.len(),
            MAX_ANALYZED_FILES
        );

        let mut combined = String::new();
        for entry in relevant.into_iter().take(MAX_ANALYZED_FILES) {
            let response = match self.request(Method::GET, entry.url.clone()).send().await {
                Ok(resp) if resp.status() == reqwest::StatusCode::OK => resp,
                _ => continue,
            };

            let blob: BlobResponse = match response.json().await {
                Ok(blob) => blob,
                Err(_) => continue,
            };

            // Blob content comes base64-encoded with embedded newlines,
            // which the strict engine rejects, so strip them first.
            let stripped: String = blob
                .content
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let decoded = match BASE64.decode(stripped.as_bytes()) {
                Ok(bytes) => bytes,
                Err(_) => continue,
            };
            let text = match String::from_utf8(decoded) {
                Ok(text) => text,
                Err(_) => continue,
            };

            combined.push_str(&format!("\n\n--- BEGIN FILE: {} ---\n", entry.path));
            combined.push_str(&text);
            combined.push_str(&format!("\n--- END FILE: {} ---\n", entry.path));
        }

        combined
    }

    /// Looks up the current SHA of a file, if it exists
    ///
    /// The contents API answers 404 for a file that does not exist yet,
    /// which maps to `Ok(None)` ("create new"). Any other non-2xx status
    /// is a hard failure.
    pub async fn find_file_sha(
        &self,
        repo: &RepositoryRef,
        path: &str,
    ) -> Result<Option<String>, GithubError> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.name, path
        );

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| GithubError::Network(e.to_string()))?;

        let status = response.status();
        match status.as_u16() {
            404 => Ok(None),
            401 => Err(GithubError::Unauthorized),
            _ if status.is_success() => {
                let item: ContentsItem = response.json().await.map_err(|e| GithubError::Api {
                    status: status.as_u16(),
                    message: format!("Failed to parse file metadata: {}", e),
                })?;
                Ok(Some(item.sha))
            }
            code => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(GithubError::Api {
                    status: code,
                    message,
                })
            }
        }
    }

    /// Creates or updates a file through the contents API
    ///
    /// Issues a PUT with the base64-encoded content and the commit message.
    /// Pass the file's current SHA to update an existing file; omit it to
    /// create a new one.
    ///
    /// # Returns
    ///
    /// The web URL of the committed file.
    pub async fn upsert_file(
        &self,
        repo: &RepositoryRef,
        path: &str,
        content: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<String, GithubError> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.name, path
        );

        let body = UpsertRequest {
            message,
            content: BASE64.encode(content.as_bytes()),
            sha,
        };

        let response = self
            .request(Method::PUT, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GithubError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                404 => GithubError::RepositoryNotFound,
                401 => GithubError::Unauthorized,
                code => {
                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    GithubError::Api {
                        status: code,
                        message,
                    }
                }
            });
        }

        let committed: UpsertResponse = response.json().await.map_err(|e| GithubError::Api {
            status: status.as_u16(),
            message: format!("Failed to parse commit response: {}", e),
        })?;

        Ok(committed.content.html_url)
    }
}
