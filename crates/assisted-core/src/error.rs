//! Error types shared by every module.
//!
//! Business-level API failures are values of [`OperationError`], never panics.
//! The entry point turns each variant into a structured failure document.

use thiserror::Error;

/// A result type using `OperationError`.
pub type Result<T> = std::result::Result<T, OperationError>;

/// Errors that can end a module invocation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The module is not configured to talk to the API at all.
    #[error("configuration error: {0}")]
    Config(String),

    /// A parameter is missing or invalid. No request was issued.
    #[error("{0}")]
    Validation(String),

    /// The API answered with a status the operation does not accept.
    #[error("{message}")]
    Remote {
        /// Operation-specific failure message.
        message: String,
        /// HTTP status code returned by the API.
        status: u16,
        /// Raw response body, verbatim.
        response: String,
    },

    /// The request did not produce a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The API reported success but the body is not valid JSON.
    #[error("{message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
        /// Raw response body, verbatim.
        response: String,
    },
}

impl OperationError {
    /// Build a [`OperationError::Remote`] from a failed response.
    #[must_use]
    pub fn remote(message: impl Into<String>, status: u16, response: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
            status,
            response: response.into(),
        }
    }

    /// Raw server response body, if the failure carries one.
    #[must_use]
    pub fn response(&self) -> Option<&str> {
        match self {
            Self::Remote { response, .. } | Self::Decode { response, .. } => Some(response),
            Self::Config(_) | Self::Validation(_) | Self::Transport(_) => None,
        }
    }

    /// HTTP status of the failed response, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure was detected before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_keeps_body_verbatim() {
        let err = OperationError::remote("Error listing clusters", 500, "{\"code\":\"500\"}");
        assert_eq!(err.to_string(), "Error listing clusters");
        assert_eq!(err.response(), Some("{\"code\":\"500\"}"));
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_local());
    }

    #[test]
    fn local_errors() {
        assert!(OperationError::Validation("missing".into()).is_local());
        assert!(OperationError::Config("no token".into()).is_local());
        assert!(!OperationError::Transport("timed out".into()).is_local());
        assert_eq!(OperationError::Validation("missing".into()).response(), None);
    }
}
