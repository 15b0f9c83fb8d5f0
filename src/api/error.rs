//! API error types for the JIRA user client.

use thiserror::Error;

use super::response::ApiResponse;

/// Errors that can occur when talking to the JIRA API.
///
/// Variants produced after a completed HTTP exchange carry the
/// [`ApiResponse`] envelope so callers can inspect the status, headers and
/// raw body of the failed call; [`ApiError::response`] is the uniform
/// accessor.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built (bad URL or unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be read.
    #[error("could not read the response body")]
    ReadBody(#[source] reqwest::Error),

    /// Authentication failed - invalid email or API token.
    #[error("authentication failed: check your email and API token")]
    Unauthorized(Box<ApiResponse>),

    /// Permission denied - the account lacks access to the resource.
    #[error("permission denied: you don't have access to this resource")]
    Forbidden(Box<ApiResponse>),

    /// Resource not found.
    #[error("resource not found: {context}")]
    NotFound {
        context: String,
        response: Box<ApiResponse>,
    },

    /// Rate limited by the JIRA API.
    #[error("rate limited: please wait before retrying")]
    RateLimited(Box<ApiResponse>),

    /// JIRA server error.
    #[error("JIRA server error: {context}")]
    ServerError {
        context: String,
        response: Box<ApiResponse>,
    },

    /// Any other non-success status.
    #[error("unexpected response: {context}")]
    UnexpectedStatus {
        context: String,
        response: Box<ApiResponse>,
    },

    /// The response body was not valid JSON for the expected shape.
    #[error("could not decode the response body")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<ApiResponse>,
    },

    /// Keyring error when storing or retrieving tokens.
    #[error("keyring error: {0}")]
    Keyring(String),

    /// Connection validation failed.
    #[error("connection validation failed: {0}")]
    ConnectionFailed(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Map a non-success response to the matching error variant.
    ///
    /// `context` is a short human-readable hint (resource name or remote
    /// error messages); the full envelope travels with the variant.
    pub fn from_status(context: &str, response: ApiResponse) -> Self {
        let status = response.status();
        let response = Box::new(response);
        match status.as_u16() {
            401 => ApiError::Unauthorized(response),
            403 => ApiError::Forbidden(response),
            404 => ApiError::NotFound {
                context: context.to_string(),
                response,
            },
            429 => ApiError::RateLimited(response),
            500..=599 => ApiError::ServerError {
                context: format!("HTTP {}: {}", status, context),
                response,
            },
            _ => ApiError::UnexpectedStatus {
                context: format!("HTTP {}: {}", status, context),
                response,
            },
        }
    }

    /// The transport envelope of the failed call, when one was captured.
    ///
    /// Present for every error produced after a completed HTTP exchange
    /// (status mapping and decode failures); absent for request
    /// construction, network and keyring errors.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            ApiError::Unauthorized(response)
            | ApiError::Forbidden(response)
            | ApiError::RateLimited(response) => Some(response),
            ApiError::NotFound { response, .. }
            | ApiError::ServerError { response, .. }
            | ApiError::UnexpectedStatus { response, .. }
            | ApiError::Decode { response, .. } => Some(response),
            _ => None,
        }
    }
}
