//! Process-level configuration.
//!
//! The controller only passes the args file path; credentials and the API
//! endpoint come from the environment through clap's `env` support. This is
//! the only place the process environment is read.

use std::path::PathBuf;

use assisted_client::{ApiConfig, DEFAULT_API_URL};
use assisted_core::{Credentials, OperationError, Result};
use clap::Parser;

/// Command line of every module binary.
#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ModuleCli {
    /// Path to the JSON arguments file written by Ansible.
    pub args_file: PathBuf,

    /// Bearer token for the Assisted Installer API.
    #[arg(long, env = "AI_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Pull secret injected into creation payloads.
    #[arg(long, env = "AI_PULL_SECRET", hide_env_values = true)]
    pub pull_secret: Option<String>,

    /// Assisted Installer API base URL.
    #[arg(long, env = "AI_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds.
    #[arg(
        long,
        env = "AI_API_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

impl ModuleCli {
    /// Settings for `args_file` with no credentials and the default endpoint.
    #[must_use]
    pub fn new(args_file: impl Into<PathBuf>) -> Self {
        Self {
            args_file: args_file.into(),
            api_token: None,
            pull_secret: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: 30,
        }
    }

    /// Credentials from the configured token and pull secret.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Config`] if no token is configured.
    pub fn credentials(&self) -> Result<Credentials> {
        let token = self
            .api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| OperationError::Config("AI_API_TOKEN is not set".to_string()))?;

        Ok(Credentials::new(token)?.with_pull_secret(self.pull_secret.clone()))
    }

    /// API client configuration.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            request_timeout_seconds: self.timeout,
            ..ApiConfig::default()
        }
    }
}
