use crate::{
    connectors::{sink::Sink, source::IssueSource},
    error::SyncError,
    fetcher::IssueFetcher,
    settings::SyncSettings,
    transform::IssueTransformer,
};
use chrono::{DateTime, Utc};
use connectors::jira::jql::RecentIssuesQuery;
use model::issue::RawIssue;
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info};

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SyncSummary {
    pub jql: String,
    pub fetched: usize,
    pub written: usize,
}

/// Drives fetch, transform and write for one lookback window.
pub struct SyncRunner<'a> {
    settings: SyncSettings,
    source: &'a dyn IssueSource,
    transformer: IssueTransformer,
}

impl<'a> SyncRunner<'a> {
    pub fn new(settings: SyncSettings, source: &'a dyn IssueSource) -> Self {
        Self {
            settings,
            source,
            transformer: IssueTransformer::new(),
        }
    }

    pub fn query(&self, now: DateTime<Utc>) -> RecentIssuesQuery {
        RecentIssuesQuery::lookback(&self.settings.project, now, self.settings.lookback_days)
    }

    pub async fn run(&self, sink: &dyn Sink) -> Result<SyncSummary, SyncError> {
        self.run_at(Utc::now(), sink).await
    }

    /// Syncs issues touched since the lookback boundary relative to `now`.
    ///
    /// The sink is closed before returning, whether or not the run
    /// succeeded. A write failure aborts the run; rows written before it
    /// stay committed.
    pub async fn run_at(
        &self,
        now: DateTime<Utc>,
        sink: &dyn Sink,
    ) -> Result<SyncSummary, SyncError> {
        let start = Instant::now();
        let jql = self.query(now).to_string();
        info!("Syncing issues matching: {jql}");

        let fetcher = IssueFetcher::new(self.source, self.settings.page_size);
        let issues = fetcher.fetch_all(&jql, &self.settings.fields).await;
        let fetched = issues.len();

        let outcome = self.write_all(&issues, sink).await;
        let closed = sink.close().await;

        let written = match (outcome, closed) {
            (Ok(written), Ok(())) => written,
            (Ok(_), Err(err)) => return Err(SyncError::Close(err)),
            (Err(err), closed) => {
                if let Err(close_err) = closed {
                    error!("Failed to release {} sink after error: {close_err}", sink.name());
                }
                return Err(err);
            }
        };

        info!(
            fetched,
            written,
            "All issues processed in {:.2?}",
            start.elapsed()
        );

        Ok(SyncSummary {
            jql,
            fetched,
            written,
        })
    }

    async fn write_all(&self, issues: &[RawIssue], sink: &dyn Sink) -> Result<usize, SyncError> {
        let total = issues.len();

        for (idx, issue) in issues.iter().enumerate() {
            if idx > 0 && !self.settings.issue_delay.is_zero() {
                tokio::time::sleep(self.settings.issue_delay).await;
            }

            let record = self.transformer.transform(issue);
            sink.upsert(&record)
                .await
                .map_err(|source| SyncError::Write {
                    issue: issue.key().unwrap_or("<no key>").to_string(),
                    source,
                })?;

            info!(
                "Processed issue {}/{}: {}",
                idx + 1,
                total,
                issue.key().unwrap_or("<no key>")
            );
        }

        Ok(total)
    }
}
