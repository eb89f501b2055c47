use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected response format: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Transport level failures, as opposed to a malformed request or response.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Api { .. } | ClientError::Timeout(_)
        )
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ClientError::Parse(_))
    }

    pub fn is_invalid_request(&self) -> bool {
        matches!(self, ClientError::InvalidRequest(_))
    }
}
