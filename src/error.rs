//! Error types for the Phonebook MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the phonebook directory API.
#[derive(Error, Debug)]
pub enum PhonebookApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned a non-success status code
    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    ApiError {
        status: u16,
        message: Option<String>,
    },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {}", .0.as_deref().unwrap_or("no message"))]
    NotFound(Option<String>),
}

impl PhonebookApiError {
    /// The human-readable message supplied by the server, if it sent one.
    ///
    /// Only status errors whose body carried an `error` field have one; callers
    /// are expected to fall back to their own generic text otherwise.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::ApiError { message, .. } => message.as_deref(),
            Self::NotFound(message) => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status code, for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with PhonebookApiError
pub type PhonebookApiResult<T> = Result<T, PhonebookApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
