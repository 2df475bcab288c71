use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the catalog API alongside a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub status_code: i64,
    pub status_message: String,
}

impl ApiError {
    pub fn new(status_code: i64, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Decode,
}

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("transport failure for {endpoint}: {message}")]
    Transport {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },
    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl FetchError {
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            status: None,
            message: message.into(),
        }
    }

    pub fn status(endpoint: impl Into<String>, status: u16, body: Option<ApiError>) -> Self {
        let message = match body {
            Some(api) => format!("status {status} ({}): {}", api.status_code, api.status_message),
            None => format!("status {status}"),
        };
        Self::Transport {
            endpoint: endpoint.into(),
            status: Some(status),
            message,
        }
    }

    pub fn decode(endpoint: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport { .. } => FetchErrorKind::Transport,
            FetchError::Decode { .. } => FetchErrorKind::Decode,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Transport { endpoint, .. } | FetchError::Decode { endpoint, .. } => {
                endpoint
            }
        }
    }
}
