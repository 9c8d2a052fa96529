use crate::connectors::source::IssueSource;
use connectors::jira::client::SearchRequest;
use model::issue::RawIssue;
use tracing::{error, info};

/// Drains every page of a search into memory.
pub struct IssueFetcher<'a> {
    source: &'a dyn IssueSource,
    page_size: usize,
}

impl<'a> IssueFetcher<'a> {
    pub fn new(source: &'a dyn IssueSource, page_size: usize) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
        }
    }

    /// Returns all issues matching `jql`.
    ///
    /// Stops at the first empty page. An upstream failure also ends the
    /// scan: it is logged and whatever was accumulated is returned.
    pub async fn fetch_all(&self, jql: &str, fields: &str) -> Vec<RawIssue> {
        let mut issues = Vec::new();
        let mut start_at = 0;

        loop {
            let request = SearchRequest {
                jql: jql.to_string(),
                fields: fields.to_string(),
                start_at,
                max_results: self.page_size,
            };

            let page = match self.source.fetch_page(&request).await {
                Ok(page) => page,
                Err(err) => {
                    error!(start_at, "Jira fetch error: {err}");
                    break;
                }
            };

            if page.is_empty() {
                break;
            }

            start_at += page.len();
            issues.extend(page.issues);
        }

        info!("Fetched {} issues", issues.len());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use connectors::jira::error::JiraError;
    use model::issue::SearchPage;
    use serde_json::json;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    /// Replays scripted pages and records every request it receives.
    struct ScriptedSource {
        pages: Mutex<Vec<Result<SearchPage, JiraError>>>,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl ScriptedSource {
        fn new(mut pages: Vec<Result<SearchPage, JiraError>>) -> Self {
            pages.reverse();
            Self {
                pages: Mutex::new(pages),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<SearchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IssueSource for ScriptedSource {
        async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchPage, JiraError> {
            self.requests.lock().unwrap().push(request.clone());
            self.pages
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(SearchPage::default()))
        }
    }

    fn page(offset: usize, count: usize) -> Result<SearchPage, JiraError> {
        let issues = (offset..offset + count)
            .map(|n| RawIssue::new(json!({ "key": format!("OI-{n}") })))
            .collect();
        Ok(SearchPage { issues })
    }

    fn upstream_error() -> Result<SearchPage, JiraError> {
        Err(JiraError::Status {
            status: 502,
            body: "upstream unavailable".to_string(),
        })
    }

    #[tokio::test]
    async fn test_paginates_until_empty_page() {
        let source = ScriptedSource::new(vec![page(0, 100), page(100, 100), page(200, 0)]);
        let fetcher = IssueFetcher::new(&source, 100);

        let issues = fetcher.fetch_all("project = OI", "summary").await;

        assert_eq!(issues.len(), 200);
        assert_eq!(issues[0].key(), Some("OI-0"));
        assert_eq!(issues[199].key(), Some("OI-199"));

        let offsets: Vec<_> = source.requests().iter().map(|r| r.start_at).collect();
        assert_eq!(offsets, vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn test_offset_advances_by_returned_count() {
        // Upstream may cap pages below the requested size.
        let source = ScriptedSource::new(vec![page(0, 50), page(50, 30), page(80, 0)]);
        let fetcher = IssueFetcher::new(&source, 100);

        let issues = fetcher.fetch_all("project = OI", "summary").await;

        assert_eq!(issues.len(), 80);
        let offsets: Vec<_> = source.requests().iter().map(|r| r.start_at).collect();
        assert_eq!(offsets, vec![0, 50, 80]);
        assert!(source.requests().iter().all(|r| r.max_results == 100));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_upstream_error_returns_accumulated_issues() {
        let source = ScriptedSource::new(vec![page(0, 100), upstream_error(), page(100, 100)]);
        let fetcher = IssueFetcher::new(&source, 100);

        let issues = fetcher.fetch_all("project = OI", "summary").await;

        assert_eq!(issues.len(), 100);
        assert_eq!(source.requests().len(), 2);
        assert!(logs_contain("Jira fetch error"));
    }

    #[tokio::test]
    async fn test_error_on_first_page_yields_nothing() {
        let source = ScriptedSource::new(vec![upstream_error()]);
        let fetcher = IssueFetcher::new(&source, 100);

        assert!(fetcher.fetch_all("project = OI", "summary").await.is_empty());
    }
}
