pub mod jira;
pub mod sql;
