//! Assisted Installer API client and module dispatchers.
//!
//! This crate provides the request/response mapping behind every module:
//!
//! - [`HttpAssistedClient`]: reqwest transport with bearer-token auth
//! - [`ClusterDispatcher`]: `clusters` list / present / absent
//! - [`InfraEnvDispatcher`]: `infra_envs` read / present / absent
//! - [`SupportLevelsDispatcher`]: `support_levels` queries
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │  module binary   │────▶│   Dispatcher     │
//! │  (args → params) │     │   (validation,   │
//! └──────────────────┘     │   status mapping)│
//!                          └────────┬─────────┘
//!                                   │
//!                          ┌────────▼─────────┐
//!                          │   AssistedApi    │
//!                          │   (trait)        │
//!                          └────────┬─────────┘
//!                                   │ HTTPS
//!                          ┌────────▼─────────┐
//!                          │ Assisted Install │
//!                          │ REST API (v2)    │
//!                          └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use assisted_client::{ApiConfig, ClusterDispatcher, HttpAssistedClient};
//! use assisted_core::{ClustersParams, Credentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("token")?;
//! let api = HttpAssistedClient::new(ApiConfig::default(), &credentials)?;
//! let dispatcher = ClusterDispatcher::new(api, credentials);
//!
//! let result = dispatcher.execute(ClustersParams::default()).await?;
//! println!("{}", result.to_value());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod api;
pub mod clusters;
pub mod config;
pub mod infra_envs;
pub mod query;
pub mod support_levels;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use api::{ApiResponse, AssistedApi, HttpAssistedClient};
pub use clusters::{list_query, ClusterDispatcher};
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use infra_envs::InfraEnvDispatcher;
pub use query::QueryFilter;
pub use support_levels::{support_levels_query, SupportLevelsDispatcher};

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{ApiCall, MockAssistedApi};
