use crate::{pg_client, test_pg_config};
use async_trait::async_trait;
use connectors::jira::{client::SearchRequest, error::JiraError};
use engine_core::{
    connectors::{sink::postgres::PostgresSink, source::IssueSource},
    settings::SyncSettings,
    sync::{SyncRunner, SyncSummary},
};
use model::issue::{RawIssue, SearchPage};
use std::time::Duration;

/// Serves a fixed issue list, paginated like the real search endpoint.
pub struct StaticSource {
    pub issues: Vec<RawIssue>,
}

impl StaticSource {
    pub fn new(issues: Vec<serde_json::Value>) -> Self {
        Self {
            issues: issues.into_iter().map(RawIssue::new).collect(),
        }
    }
}

#[async_trait]
impl IssueSource for StaticSource {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchPage, JiraError> {
        let issues = self
            .issues
            .iter()
            .skip(request.start_at)
            .take(request.max_results)
            .cloned()
            .collect();
        Ok(SearchPage { issues })
    }
}

/// Runs one sync of `source` into `table` on the test database.
pub async fn run_sync(source: &StaticSource, table: &str) -> SyncSummary {
    let settings = SyncSettings {
        table: table.to_string(),
        issue_delay: Duration::ZERO,
        page_size: 2,
        ..SyncSettings::default()
    };
    let sink = PostgresSink::connect(&test_pg_config(), &settings.table)
        .await
        .expect("connect sink");

    SyncRunner::new(settings, source)
        .run(&sink)
        .await
        .expect("sync ran")
}

pub async fn get_row_count(table: &str) -> i64 {
    let client = pg_client().await;
    let row = client
        .query_one(&format!("SELECT COUNT(*) FROM {table};"), &[])
        .await
        .expect("count rows");
    row.get(0)
}

/// Text cell of the row with `issue_id`; `None` when NULL.
pub async fn get_cell_as_string(table: &str, issue_id: &str, column: &str) -> Option<String> {
    let client = pg_client().await;
    let row = client
        .query_one(
            &format!("SELECT \"{column}\" FROM {table} WHERE issue_id = $1;"),
            &[&issue_id],
        )
        .await
        .unwrap_or_else(|e| panic!("no row for issue `{issue_id}`: {e}"));
    row.get(0)
}

/// BIGINT cell of the row with `issue_id`; `None` when NULL.
pub async fn get_cell_as_i64(table: &str, issue_id: &str, column: &str) -> Option<i64> {
    let client = pg_client().await;
    let row = client
        .query_one(
            &format!("SELECT \"{column}\" FROM {table} WHERE issue_id = $1;"),
            &[&issue_id],
        )
        .await
        .unwrap_or_else(|e| panic!("no row for issue `{issue_id}`: {e}"));
    row.get(0)
}
