//! GitHub REST API integration
//!
//! Everything the relay needs from the hosting service lives here: parsing
//! an owner/repo pair out of a user-supplied URL, listing branches and
//! commits, gathering source file contents for analysis, and committing a
//! generated file back via the contents API.

mod client;
mod repository;

pub use client::{
    GithubClient, GithubError, COMMIT_HISTORY_LIMIT, DEFAULT_API_BASE, MAX_ANALYZED_FILES,
};
pub use repository::RepositoryRef;
