//! Error handling for the LexFlow client core

use thiserror::Error;

/// Field-level rejection raised before any remote call is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Name of the offending input field
    pub field: &'static str,

    /// Human-readable reason, suitable for display next to the field
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error for a named field
    pub fn new<T: Into<String>>(field: &'static str, message: T) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors surfaced by the identity provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The provider rejected the supplied credentials
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The account exists but its email address has not been confirmed yet
    #[error("email address not confirmed")]
    Unconfirmed,

    /// An account with this email already exists
    #[error("account already exists: {0}")]
    Conflict(String),

    /// The provider could not be reached or answered with a server error
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    /// An operation that needs an active session was called without one
    #[error("no active session")]
    MissingSession,
}

/// Errors surfaced by the data store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A row with the same key already exists
    #[error("row already exists: {0}")]
    Conflict(String),

    /// The requested table or row does not exist
    #[error("not found")]
    NotFound,

    /// The store could not be reached or answered with a server error
    #[error("data store unavailable: {0}")]
    Unavailable(String),
}

/// Unified error type for the LexFlow client
#[derive(Error, Debug)]
pub enum Error {
    /// Local input rejected before any network traffic
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Identity provider errors
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Data store errors
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
