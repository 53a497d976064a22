/// A repository coordinate on the hosting service
///
/// Parsed out of a user-supplied URL by taking the last two path segments.
/// Both fields are guaranteed non-empty; any downstream API call relies on
/// that.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RepositoryRef {
    /// GitHub username or organization owning the repository
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepositoryRef {
    /// Parses a repository URL into an owner/repo pair
    ///
    /// Accepts anything shaped like `.../owner/repo`, with optional trailing
    /// slashes and an optional `.git` suffix. There is no host or character
    /// set validation; the GitHub API is the ultimate validator.
    ///
    /// # Returns
    ///
    /// `None` when the input contains fewer than two path segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsync::github::RepositoryRef;
    ///
    /// let repo = RepositoryRef::parse("https://github.com/user/repo.git/").unwrap();
    /// assert_eq!(repo.owner, "user");
    /// assert_eq!(repo.name, "repo");
    /// ```
    pub fn parse(url: &str) -> Option<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return None;
        }

        let name = segments[segments.len() - 1];
        let owner = segments[segments.len() - 2];
        if owner.is_empty() || name.is_empty() {
            return None;
        }

        Some(RepositoryRef {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
