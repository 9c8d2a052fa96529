use thiserror::Error;

#[derive(Debug, Error)]
pub enum JiraError {
    /// Request could not be sent or the connection failed mid-response.
    #[error("Jira request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The search endpoint answered with a non-success status.
    #[error("Jira returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode Jira response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid Jira base URL '{0}'")]
    InvalidUrl(String),
}
