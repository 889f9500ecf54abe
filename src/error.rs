//! Error types for backend requests and durable storage.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::client::Endpoint;

/// A failed call to one of the text endpoints.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The backend answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: Endpoint,
        status: reqwest::StatusCode,
    },

    /// No complete response arrived within the configured timeout.
    #[error("{endpoint} timed out after {} ms", .timeout.as_millis())]
    Timeout { endpoint: Endpoint, timeout: Duration },

    /// Connection refused, DNS failure, reset and similar.
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not valid JSON.
    #[error("{endpoint} returned an invalid JSON body: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            RequestError::Status { endpoint, .. }
            | RequestError::Timeout { endpoint, .. }
            | RequestError::Transport { endpoint, .. }
            | RequestError::Decode { endpoint, .. } => *endpoint,
        }
    }

    /// Map a reqwest failure onto the matching variant.
    pub(crate) fn from_reqwest(endpoint: Endpoint, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout { endpoint, timeout }
        } else if err.is_decode() {
            RequestError::Decode {
                endpoint,
                source: err,
            }
        } else {
            RequestError::Transport {
                endpoint,
                source: err,
            }
        }
    }
}

/// Failure reading or writing the settings file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode settings: {0}")]
    Json(#[from] serde_json::Error),
}
