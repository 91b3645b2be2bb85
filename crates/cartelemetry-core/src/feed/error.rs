//! Feed transport errors

use thiserror::Error;

/// Errors that can occur talking to the telemetry channel
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Channel returned HTTP {0}")]
    Status(u16),

    #[error("Invalid channel URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed feed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FeedError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Status(code) => Some(*code),
            FeedError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
