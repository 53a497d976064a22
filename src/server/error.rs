use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::github::GithubError;

/// Error type returned by every endpoint
///
/// Serializes to `{"error": "<message>"}` with the matching status code,
/// the shape the frontend expects.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    NotImplemented(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Error mapping for the read path (`/analyze`)
///
/// A missing repository is a 404 and bad credentials are a 401; any other
/// API or transport failure surfaces as a 400 with the upstream status
/// embedded in the message.
impl From<GithubError> for ApiError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::RepositoryNotFound => ApiError::NotFound(err.to_string()),
            GithubError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            GithubError::Api { status, .. } => {
                ApiError::BadRequest(format!("GitHub API error ({}).", status))
            }
            GithubError::Network(e) => ApiError::BadRequest(format!("Connection error: {}", e)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
