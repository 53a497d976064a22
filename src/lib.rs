//! DocSync backend relay
//!
//! This library powers a small HTTP service that:
//! - Fetches branch, commit, and file data from the GitHub REST API
//! - Forwards that data inside natural-language prompts to the Gemini API
//! - Parses the model's free-form reply back into structured JSON
//! - Optionally commits a generated README.md back to the repository
//!
//! ## Authentication
//!
//! GitHub operations require a token, resolved per request with a simple
//! precedence rule: a token supplied in the request body overrides the
//! server-side default read from the `GITHUB_TOKEN` environment variable
//! at startup. See [`auth::resolve_token`].
//!
//! The Gemini client is configured once at process start from the
//! `GEMINI_API_KEY` environment variable. When the key is missing the
//! model-backed endpoints answer with an explicit "not initialized" error
//! instead of failing somewhere downstream.
//!
//! ## Usage
//!
//! The usual entry point is the `docsync-server` binary, which wires the
//! pieces together behind an axum router:
//!
//! ```no_run
//! use docsync::server::{router, AppState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let state = AppState::new(std::env::var("GITHUB_TOKEN").ok(), None);
//! let app = router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod auth;
pub mod gemini;
pub mod github;
pub mod server;
