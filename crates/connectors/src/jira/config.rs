use std::fmt;

/// Page size used by the search endpoint.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Credentials and location of the Jira instance.
#[derive(Clone)]
pub struct JiraConfig {
    /// Base URL without the REST path, e.g. `https://acme.atlassian.net`.
    pub base_url: String,
    pub username: String,
    pub api_token: String,
}

impl JiraConfig {
    pub fn search_url(&self) -> String {
        format!("{}/rest/api/2/search", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> JiraConfig {
        JiraConfig {
            base_url: base_url.to_string(),
            username: "bot@acme.test".to_string(),
            api_token: "secret-token".to_string(),
        }
    }

    #[test]
    fn test_search_url_tolerates_trailing_slash() {
        assert_eq!(
            config("https://acme.atlassian.net/").search_url(),
            "https://acme.atlassian.net/rest/api/2/search"
        );
        assert_eq!(
            config("https://acme.atlassian.net").search_url(),
            "https://acme.atlassian.net/rest/api/2/search"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let rendered = format!("{:?}", config("https://acme.atlassian.net"));
        assert!(!rendered.contains("secret-token"));
    }
}
