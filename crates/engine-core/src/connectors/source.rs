use async_trait::async_trait;
use connectors::jira::{
    client::{JiraClient, SearchRequest},
    error::JiraError,
};
use model::issue::SearchPage;

/// Upstream that answers paginated issue searches.
#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchPage, JiraError>;
}

#[async_trait]
impl IssueSource for JiraClient {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchPage, JiraError> {
        self.search(request).await
    }
}
