//! API credentials.

use std::fmt;

use crate::error::{OperationError, Result};

/// Bearer token and pull secret used by every module.
///
/// Both values are opaque. They are handed to the dispatchers at construction
/// so nothing below the entry point reads the process environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_token: String,
    pull_secret: Option<String>,
}

impl Credentials {
    /// Create credentials from an API token.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Config`] if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(OperationError::Config("API token must not be empty".to_string()));
        }

        Ok(Self {
            api_token,
            pull_secret: None,
        })
    }

    /// Attach a pull secret. Empty values are treated as absent.
    #[must_use]
    pub fn with_pull_secret(mut self, pull_secret: Option<String>) -> Self {
        self.pull_secret = pull_secret.filter(|s| !s.is_empty());
        self
    }

    /// The bearer token.
    #[must_use]
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// The pull secret, if one is configured.
    #[must_use]
    pub fn pull_secret(&self) -> Option<&str> {
        self.pull_secret.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field(
                "pull_secret",
                &self.pull_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_rejected() {
        assert!(matches!(
            Credentials::new("  "),
            Err(OperationError::Config(_))
        ));
    }

    #[test]
    fn empty_pull_secret_is_absent() {
        let creds = Credentials::new("tok")
            .unwrap()
            .with_pull_secret(Some(String::new()));
        assert_eq!(creds.pull_secret(), None);
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::new("supersecrettoken")
            .unwrap()
            .with_pull_secret(Some("pullsecretvalue".to_string()));
        let debug = format!("{creds:?}");
        assert!(!debug.contains("supersecrettoken"));
        assert!(!debug.contains("pullsecretvalue"));
        assert!(debug.contains("<redacted>"));
    }
}
