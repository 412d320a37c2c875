//! Domain Errors
//!
//! Error types for quote operations.

use thiserror::Error;

/// Errors raised while resolving or rendering quoted messages
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The caller invoked an operation outside the context it requires
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The platform answered a request with an error status
    #[error("Platform error ({status}): {message}")]
    Http { status: u16, message: String },

    /// The platform could not be reached or returned garbage
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuoteError {
    pub fn http<T: AsRef<str>>(status: u16, message: T) -> Self {
        Self::Http {
            status,
            message: message.as_ref().to_string(),
        }
    }

    /// Whether this failure only concerns one channel and a lookup may move on
    pub fn is_per_channel(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}
