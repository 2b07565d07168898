//! Core types for the Assisted Installer Ansible modules.
//!
//! This crate provides the foundational types shared by the API client and the
//! module binaries:
//!
//! - **Parameters**: typed module arguments, including the closed
//!   [`ClusterAction`] enum
//! - **Credentials**: the bearer token and pull secret, injected explicitly
//! - **Results**: the [`ModuleResult`] success document and [`ModuleFailure`]
//! - **Errors**: the [`OperationError`] taxonomy
//!
//! # Example
//!
//! ```
//! use assisted_core::{ClusterAction, ClustersParams};
//!
//! let params: ClustersParams = serde_json::from_value(serde_json::json!({
//!     "action": "absent",
//!     "cluster_id": "deadbeef",
//! }))
//! .unwrap();
//!
//! assert_eq!(params.action, ClusterAction::Absent);
//! assert_eq!(params.cluster_id(), Some("deadbeef"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod credentials;
pub mod error;
pub mod params;
pub mod result;

pub use credentials::Credentials;
pub use error::{OperationError, Result};
pub use params::{
    ArgumentSpec, ClusterAction, ClustersParams, CpuArchitecture, InfraEnvParams, InfraEnvState,
    PlatformType, RegisterClusterParams, ResourceType, SupportLevelsParams,
};
pub use result::{ModuleFailure, ModuleResult};
