use connectors::jira::config::DEFAULT_PAGE_SIZE;
use std::time::Duration;

pub const DEFAULT_PROJECT: &str = "OI";
pub const DEFAULT_TABLE: &str = "optum_incident";
pub const DEFAULT_LOOKBACK_DAYS: i64 = 1;
pub const DEFAULT_ISSUE_DELAY: Duration = Duration::from_millis(300);

/// Fields requested from the search endpoint; everything the transformer reads.
pub const DEFAULT_FIELDS: &str = "customfield_12310,customfield_10900,assignee,components,status,priority,summary,reporter,created,issuelinks";

/// Knobs for one sync run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSettings {
    /// Project key placed in the filter expression.
    pub project: String,
    /// Comma-separated field selection sent upstream.
    pub fields: String,
    /// Days before "now" (UTC) that the filter reaches back.
    pub lookback_days: i64,
    /// Pause between consecutive issues.
    pub issue_delay: Duration,
    pub page_size: usize,
    /// Destination table, optionally `schema.table`.
    pub table: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            fields: DEFAULT_FIELDS.to_string(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            issue_delay: DEFAULT_ISSUE_DELAY,
            page_size: DEFAULT_PAGE_SIZE,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}
