use crate::jira::{config::JiraConfig, error::JiraError};
use model::issue::SearchPage;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Parameters of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub jql: String,
    /// Comma-separated field selection.
    pub fields: String,
    pub start_at: usize,
    pub max_results: usize,
}

impl SearchRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("jql", self.jql.clone()),
            ("maxResults", self.max_results.to_string()),
            ("startAt", self.start_at.to_string()),
            ("fields", self.fields.clone()),
            ("expand", "changelog".to_string()),
        ]
    }
}

/// Thin client over the issue search endpoint.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    search_url: Url,
    config: JiraConfig,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self, JiraError> {
        let search_url = Url::parse(&config.search_url())
            .map_err(|_| JiraError::InvalidUrl(config.base_url.clone()))?;
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            search_url,
            config,
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Fetches one page of issues with their changelog expanded.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage, JiraError> {
        debug!(
            start_at = request.start_at,
            max_results = request.max_results,
            "Requesting Jira search page"
        );

        let response = self
            .http
            .get(self.search_url.clone())
            .basic_auth(&self.config.username, Some(&self.config.api_token))
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(JiraError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_expand_changelog() {
        let request = SearchRequest {
            jql: "project = OI".to_string(),
            fields: "summary,status".to_string(),
            start_at: 200,
            max_results: 100,
        };

        let pairs = request.query_pairs();
        assert!(pairs.contains(&("startAt", "200".to_string())));
        assert!(pairs.contains(&("maxResults", "100".to_string())));
        assert!(pairs.contains(&("fields", "summary,status".to_string())));
        assert!(pairs.contains(&("expand", "changelog".to_string())));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = JiraConfig {
            base_url: "not a url".to_string(),
            username: "u".to_string(),
            api_token: "t".to_string(),
        };
        assert!(matches!(
            JiraClient::new(config),
            Err(JiraError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_builds_search_url() {
        let config = JiraConfig {
            base_url: "https://acme.atlassian.net".to_string(),
            username: "u".to_string(),
            api_token: "t".to_string(),
        };
        let client = JiraClient::new(config).unwrap();
        assert_eq!(
            client.search_url().as_str(),
            "https://acme.atlassian.net/rest/api/2/search"
        );
    }
}
