//! The module implementations shipped as binaries.

use assisted_client::{
    ClusterDispatcher, HttpAssistedClient, InfraEnvDispatcher, SupportLevelsDispatcher,
};
use assisted_core::{
    ArgumentSpec, ClustersParams, Credentials, InfraEnvParams, ModuleResult,
    RegisterClusterParams, Result, SupportLevelsParams,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::settings::ModuleCli;

/// One Ansible module.
#[async_trait]
pub trait AnsibleModule {
    /// Module name as the controller knows it.
    const NAME: &'static str;

    /// Typed parameters.
    type Params: DeserializeOwned + ArgumentSpec + Send;

    /// Run one invocation.
    ///
    /// # Errors
    ///
    /// Returns the operation's failure, to be reported as a failure document.
    async fn run(params: Self::Params, cli: &ModuleCli) -> Result<ModuleResult>;
}

fn connect(cli: &ModuleCli) -> Result<(HttpAssistedClient, Credentials)> {
    let credentials = cli.credentials()?;
    let api = HttpAssistedClient::new(cli.api_config(), &credentials)?;
    tracing::debug!(base_url = api.base_url(), "Using Assisted Installer API");
    Ok((api, credentials))
}

/// `clusters`: list, register or delete clusters.
#[derive(Debug, Clone, Copy)]
pub struct ClustersModule;

#[async_trait]
impl AnsibleModule for ClustersModule {
    const NAME: &'static str = "clusters";
    type Params = ClustersParams;

    async fn run(params: ClustersParams, cli: &ModuleCli) -> Result<ModuleResult> {
        let (api, credentials) = connect(cli)?;
        ClusterDispatcher::new(api, credentials).execute(params).await
    }
}

/// `register_cluster`: register a cluster from `data`.
#[derive(Debug, Clone, Copy)]
pub struct RegisterClusterModule;

#[async_trait]
impl AnsibleModule for RegisterClusterModule {
    const NAME: &'static str = "register_cluster";
    type Params = RegisterClusterParams;

    async fn run(params: RegisterClusterParams, cli: &ModuleCli) -> Result<ModuleResult> {
        let (api, credentials) = connect(cli)?;
        ClusterDispatcher::new(api, credentials)
            .execute(params.into())
            .await
    }
}

/// `infra_envs`: read, create or delete infra-envs.
#[derive(Debug, Clone, Copy)]
pub struct InfraEnvsModule;

#[async_trait]
impl AnsibleModule for InfraEnvsModule {
    const NAME: &'static str = "infra_envs";
    type Params = InfraEnvParams;

    async fn run(params: InfraEnvParams, cli: &ModuleCli) -> Result<ModuleResult> {
        let (api, credentials) = connect(cli)?;
        InfraEnvDispatcher::new(api, credentials)
            .execute(params)
            .await
    }
}

/// `support_levels`: query supported architectures or features.
#[derive(Debug, Clone, Copy)]
pub struct SupportLevelsModule;

#[async_trait]
impl AnsibleModule for SupportLevelsModule {
    const NAME: &'static str = "support_levels";
    type Params = SupportLevelsParams;

    async fn run(params: SupportLevelsParams, cli: &ModuleCli) -> Result<ModuleResult> {
        let (api, _) = connect(cli)?;
        SupportLevelsDispatcher::new(api).execute(params).await
    }
}
