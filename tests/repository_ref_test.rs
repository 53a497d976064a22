use docsync::github::RepositoryRef;

#[test]
fn test_parse_repository_url() {
    // Test cases for different URL formats
    let test_cases = [
        ("https://github.com/user/repo", "user", "repo"),
        ("https://github.com/user/repo.git", "user", "repo"),
        ("https://github.com/user/repo/", "user", "repo"),
        ("https://github.com/user/repo.git/", "user", "repo"),
        ("https://github.com/user/multi-part-repo", "user", "multi-part-repo"),
        ("https://github.com/org-name/repo", "org-name", "repo"),
        ("http://github.com/user/repo", "user", "repo"),
        ("github.com/user/repo", "user", "repo"),
        ("user/repo", "user", "repo"),
        ("  https://github.com/user/repo  ", "user", "repo"),
        ("https://github.com/user/repo///", "user", "repo"),
    ];

    for (url, expected_owner, expected_name) in test_cases {
        let parsed =
            RepositoryRef::parse(url).unwrap_or_else(|| panic!("expected '{}' to parse", url));
        assert_eq!(parsed.owner, expected_owner, "owner mismatch for '{}'", url);
        assert_eq!(parsed.name, expected_name, "name mismatch for '{}'", url);
    }
}

#[test]
fn test_parse_rejects_short_urls() {
    // Fewer than two path segments means there is no owner/repo pair
    let invalid = ["", "   ", "repo", "repo.git", "https:", "/", "///", "github.com/"];

    for url in invalid {
        assert!(
            RepositoryRef::parse(url).is_none(),
            "expected '{}' to be rejected",
            url
        );
    }
}

#[test]
fn test_display_is_owner_slash_name() {
    let repo = RepositoryRef::parse("https://github.com/user/repo").unwrap();
    assert_eq!(repo.to_string(), "user/repo");
}
