//! Filter expressions for the search endpoint.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::fmt;

/// Selects one project's issues created or updated on/after a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentIssuesQuery {
    pub project: String,
    pub since: NaiveDate,
}

impl RecentIssuesQuery {
    pub fn new(project: &str, since: NaiveDate) -> Self {
        Self {
            project: project.to_string(),
            since,
        }
    }

    /// Query covering the `days` days before `now` (UTC calendar date).
    pub fn lookback(project: &str, now: DateTime<Utc>, days: i64) -> Self {
        Self::new(project, (now - Duration::days(days)).date_naive())
    }
}

impl fmt::Display for RecentIssuesQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let since = self.since.format("%Y-%m-%d");
        write!(
            f,
            r#"project = {} AND (created >= "{since}" OR updated >= "{since}")"#,
            self.project
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_renders_project_and_window() {
        let query = RecentIssuesQuery::new("OI", NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(
            query.to_string(),
            r#"project = OI AND (created >= "2024-03-09" OR updated >= "2024-03-09")"#
        );
    }

    #[test]
    fn test_lookback_uses_utc_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 30, 0).unwrap();
        let query = RecentIssuesQuery::lookback("OI", now, 1);
        assert_eq!(query.since, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
