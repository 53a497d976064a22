//! Credential resolution
//!
//! A GitHub token can arrive from two places: the request body, or the
//! server-side default read from the environment at startup. The precedence
//! is a single pure function so it stays independently testable.

/// Resolves the effective GitHub token for a request
///
/// The user-supplied token wins over the server default. Blank or
/// whitespace-only strings count as absent.
pub fn resolve_token(user_token: Option<&str>, server_default: Option<&str>) -> Option<String> {
    user_token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| server_default.filter(|t| !t.trim().is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_token_wins() {
        assert_eq!(
            resolve_token(Some("user"), Some("default")),
            Some("user".to_string())
        );
    }

    #[test]
    fn falls_back_to_server_default() {
        assert_eq!(
            resolve_token(None, Some("default")),
            Some("default".to_string())
        );
    }

    #[test]
    fn blank_user_token_counts_as_absent() {
        assert_eq!(
            resolve_token(Some("   "), Some("default")),
            Some("default".to_string())
        );
        assert_eq!(resolve_token(Some(""), None), None);
    }

    #[test]
    fn both_absent_resolves_to_none() {
        assert_eq!(resolve_token(None, None), None);
    }
}
