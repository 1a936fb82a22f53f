//! Error types for appraise-core

use thiserror::Error;

/// Errors from the backend API
///
/// The HTTP layer maps status codes onto this taxonomy and never acts on
/// them itself: `Unauthorized` in particular is surfaced to the caller so
/// a single top-level handler can clear the identity store and route the
/// user back to login.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The stored credential is missing, invalid, or expired (401-class)
    #[error("unauthorized: credential is invalid or expired")]
    Unauthorized,

    /// The requested resource does not exist (404-class)
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend rejected the request with a non-auth error status
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Transport failure or timeout
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Errors from the identity store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read or write session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize session: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A transition was refused because a required field is missing
///
/// Shown inline to the user; never retried automatically.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("question {question_id} requires an answer")]
pub struct ValidationError {
    pub question_id: i64,
}

/// Errors from the assessment session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid session state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    #[error("test has no questions")]
    NoQuestions,

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}
