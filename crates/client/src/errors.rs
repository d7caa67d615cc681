//! Client errors.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request was aborted after the configured timeout.
    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {reason}")]
    Status {
        /// Numeric status code
        status: u16,

        /// Canonical reason phrase
        reason: String,

        /// Response body, if any
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns the HTTP status for [`ClientError::Status`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) | Self::Timeout(_) | Self::Decode(_) => None,
        }
    }

    /// Check if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
