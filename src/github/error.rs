// src/github/error.rs
// =============================================================================
// Errors produced by the GitHub API client.
//
// There are three ways a request can go wrong:
// - Network: we never got a response (DNS, connection refused, TLS, ...)
// - Api: GitHub answered with a non-2xx status
// - InvalidResponse: GitHub answered 2xx but the body wasn't what we expected
//
// The Display text of each variant is what ends up on screen, so it is kept
// short and human-readable.
// =============================================================================

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport-level failure, no HTTP response was received
    #[error("Network error: {0}")]
    Network(String),

    /// GitHub responded with a non-success status code
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A success response whose body could not be decoded
    #[error("Unexpected response from GitHub: {0}")]
    InvalidResponse(String),
}

// GitHub error bodies look like {"message": "Not Found", "documentation_url": "..."}
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// HTTP status for `Api` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn network(error: reqwest::Error) -> Self {
        ApiError::Network(error.to_string())
    }

    pub fn decode(error: reqwest::Error) -> Self {
        ApiError::InvalidResponse(error.to_string())
    }

    // Builds an Api error from a failed response.
    //
    // Message priority:
    //   1. "message" field from the JSON body (if present and non-empty)
    //   2. the status's reason phrase ("Forbidden", "Not Found", ...)
    //   3. the caller's fallback text
    pub fn from_status(status: StatusCode, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());

        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
