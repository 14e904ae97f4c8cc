use thiserror::Error;

/// Failures from the outbound API clients.
///
/// The recommendation and content pipeline never hands these to its caller;
/// they are logged and converted into the next fallback tier.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} API key not configured")]
    MissingApiKey(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Unable to repair JSON: {0}")]
    Repair(String),
}

impl ServiceError {
    /// Build a `Status` error from a non-success response, consuming its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ServiceError::Status { status, body }
    }
}
