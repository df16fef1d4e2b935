//! Result and error types for the core library

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// The request never got a response (DNS, connect, TLS)
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status and a `message`
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The server answered with a non-success status and nothing readable
    #[error("Server returned HTTP {status}")]
    Http { status: u16 },

    /// The server answered 2xx but the body was not what we expected
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not logged in. Run 'bn login' first.")]
    NotAuthenticated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status for server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Text to show the user for a failed action.
    ///
    /// Server-reported messages are shown verbatim. Transport failures and
    /// anything else collapse to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Validation(msg) => msg.clone(),
            Self::NotAuthenticated => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a user-initiated action that must always produce something
/// displayable (login, registration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Convert a core result, using `fallback` when the error carries no
    /// server message
    pub fn from_result(result: Result<T>, fallback: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.user_message(fallback)),
        }
    }
}
