//! Session error types

use thiserror::Error;

/// Standard result type for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by the session core.
///
/// Credential rejection by the server and local expiry are handled inside the
/// gateway and the route guard respectively and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Malformed credential: {reason}")]
    MalformedCredential { reason: String },

    #[error("Session storage failed: {message}")]
    Storage { message: String },
}

impl SessionError {
    /// Create a malformed credential error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCredential {
            reason: reason.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the token itself was the problem
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedCredential { .. })
    }
}
