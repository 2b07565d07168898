//! Typed module parameters.
//!
//! Each struct mirrors one module's argument spec. They deserialize from the
//! args document after the protocol layer has stripped the controller's
//! internal `_ansible_*` keys, and reject any key they do not declare.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::OperationError;

/// The parameter names a module declares.
///
/// Anything else in the args document is rejected before deserialization.
pub trait ArgumentSpec {
    /// Declared parameter names, sorted.
    const PARAMETERS: &'static [&'static str];
}

// =============================================================================
// clusters / register_cluster
// =============================================================================

/// The operation a `clusters` invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum ClusterAction {
    /// List clusters.
    #[default]
    List,
    /// Register a new cluster.
    Present,
    /// Delete a cluster.
    Absent,
}

impl ClusterAction {
    /// Every accepted action, in documentation order.
    pub const ALL: [Self; 3] = [Self::List, Self::Present, Self::Absent];

    /// The parameter value for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for ClusterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterAction {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                let choices: Vec<&str> = Self::ALL.iter().map(Self::as_str).collect();
                OperationError::Validation(format!(
                    "value of action must be one of: {}, got: {s}",
                    choices.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for ClusterAction {
    type Error = OperationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Arguments of the `clusters` module.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClustersParams {
    /// Operation to perform.
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: ClusterAction,
    /// Target cluster for `absent`.
    #[serde(default)]
    pub cluster_id: Option<String>,
    /// Include hosts in the returned list.
    #[serde(default, deserialize_with = "ansible_bool::deserialize")]
    pub with_hosts: bool,
    /// Creation fields for `present`.
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl ArgumentSpec for ClustersParams {
    const PARAMETERS: &'static [&'static str] = &["action", "cluster_id", "data", "with_hosts"];
}

impl ClustersParams {
    /// The cluster ID, if one was given and is non-empty.
    #[must_use]
    pub fn cluster_id(&self) -> Option<&str> {
        self.cluster_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Arguments of the `register_cluster` module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterClusterParams {
    /// Creation fields for the new cluster.
    pub data: Map<String, Value>,
}

impl ArgumentSpec for RegisterClusterParams {
    const PARAMETERS: &'static [&'static str] = &["data"];
}

impl From<RegisterClusterParams> for ClustersParams {
    fn from(params: RegisterClusterParams) -> Self {
        Self {
            action: ClusterAction::Present,
            data: Some(params.data),
            ..Self::default()
        }
    }
}

// =============================================================================
// infra_envs
// =============================================================================

/// Desired state for an infra-env. Unset means read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfraEnvState {
    /// Create the infra-env.
    Present,
    /// Delete the infra-env.
    Absent,
}

/// Arguments of the `infra_envs` module.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InfraEnvParams {
    /// Desired state. `None` lists or fetches.
    #[serde(default)]
    pub state: Option<InfraEnvState>,
    /// Target infra-env for reads and deletes.
    #[serde(default)]
    pub infra_env_id: Option<String>,
    /// Name of the infra-env to create.
    #[serde(default)]
    pub name: Option<String>,
    /// Pull secret for creation. Falls back to the configured one.
    #[serde(default)]
    pub pull_secret: Option<String>,
}

impl ArgumentSpec for InfraEnvParams {
    const PARAMETERS: &'static [&'static str] = &["infra_env_id", "name", "pull_secret", "state"];
}

impl InfraEnvParams {
    /// The infra-env ID, if one was given and is non-empty.
    #[must_use]
    pub fn infra_env_id(&self) -> Option<&str> {
        self.infra_env_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The name, if one was given and is non-empty.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl fmt::Debug for InfraEnvParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraEnvParams")
            .field("state", &self.state)
            .field("infra_env_id", &self.infra_env_id)
            .field("name", &self.name)
            .field("pull_secret", &self.pull_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// =============================================================================
// support_levels
// =============================================================================

/// What a support-levels query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Supported CPU architectures.
    Architectures,
    /// Supported features.
    Features,
}

impl ResourceType {
    /// Path segment used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Architectures => "architectures",
            Self::Features => "features",
        }
    }
}

/// CPU architecture of an OpenShift release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CpuArchitecture {
    /// `x86_64`
    #[default]
    #[serde(rename = "x86_64")]
    X86_64,
    /// `aarch64`
    #[serde(rename = "aarch64")]
    Aarch64,
    /// `arm64`
    #[serde(rename = "arm64")]
    Arm64,
    /// `ppc64le`
    #[serde(rename = "ppc64le")]
    Ppc64le,
    /// `s390x`
    #[serde(rename = "s390x")]
    S390x,
    /// `multi`
    #[serde(rename = "multi")]
    Multi,
}

impl CpuArchitecture {
    /// Query value used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
            Self::Arm64 => "arm64",
            Self::Ppc64le => "ppc64le",
            Self::S390x => "s390x",
            Self::Multi => "multi",
        }
    }
}

/// Provider platform type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    /// Bare metal.
    Baremetal,
    /// No platform integration.
    None,
    /// Nutanix.
    Nutanix,
    /// vSphere.
    Vsphere,
    /// External platform, see `external_platform_name`.
    External,
}

impl PlatformType {
    /// Query value used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Baremetal => "baremetal",
            Self::None => "none",
            Self::Nutanix => "nutanix",
            Self::Vsphere => "vsphere",
            Self::External => "external",
        }
    }
}

/// Arguments of the `support_levels` module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportLevelsParams {
    /// Resource to query.
    pub resource_type: ResourceType,
    /// OpenShift version, e.g. `4.16.19`.
    pub openshift_version: String,
    /// CPU architecture of the release.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu_architecture: CpuArchitecture,
    /// Provider platform type.
    #[serde(default)]
    pub platform_type: Option<PlatformType>,
    /// External platform name when `platform_type` is `external`.
    #[serde(default)]
    pub external_platform_name: Option<String>,
}

impl ArgumentSpec for SupportLevelsParams {
    const PARAMETERS: &'static [&'static str] = &[
        "cpu_architecture",
        "external_platform_name",
        "openshift_version",
        "platform_type",
        "resource_type",
    ];
}

/// An explicit `null` means the parameter was not set.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Ansible-style boolean coercion: accepts JSON booleans, `0`/`1`, and the
/// usual truthy/falsy strings (`yes`, `no`, `on`, `off`, ...). `null` is
/// unset, i.e. `false`.
mod ansible_bool {
    use serde::{de, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(de::Error::custom(format!(
                    "{n} cannot be converted to a bool"
                ))),
            },
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "yes" | "on" | "1" | "true" | "t" | "y" => Ok(true),
                "no" | "off" | "0" | "false" | "f" | "n" | "" => Ok(false),
                _ => Err(de::Error::custom(format!(
                    "'{s}' cannot be converted to a bool"
                ))),
            },
            other => Err(de::Error::custom(format!(
                "{other} cannot be converted to a bool"
            ))),
        }
    }
}
