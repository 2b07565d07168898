//! Dispatcher for the `clusters` and `register_cluster` modules.
//!
//! Each invocation runs exactly one action and issues at most one request.
//! Validation failures are reported before anything is sent.

use assisted_core::{
    ClusterAction, ClustersParams, Credentials, ModuleResult, OperationError, Result,
};
use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::api::{ApiResponse, AssistedApi};
use crate::query::QueryFilter;

/// Payload key the pull secret is injected under.
pub const PULL_SECRET_KEY: &str = "pull_secret";

/// Build the query filter for a cluster listing.
///
/// `with_hosts` is the only recognized key and is included only when true.
#[must_use]
pub fn list_query(with_hosts: bool) -> QueryFilter {
    QueryFilter::new().flag("with_hosts", with_hosts)
}

/// Runs cluster actions against an [`AssistedApi`].
#[derive(Debug)]
pub struct ClusterDispatcher<A> {
    api: A,
    credentials: Credentials,
}

impl<A: AssistedApi> ClusterDispatcher<A> {
    /// Create a dispatcher.
    #[must_use]
    pub fn new(api: A, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    /// The underlying API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the action named by `params`.
    ///
    /// # Errors
    ///
    /// - [`OperationError::Validation`] when `absent` has no `cluster_id`, or
    ///   `present` has no `data` or no pull secret is configured
    /// - [`OperationError::Remote`] when the API rejects the request
    /// - [`OperationError::Transport`] / [`OperationError::Decode`] when no
    ///   usable response was received
    pub async fn execute(&self, params: ClustersParams) -> Result<ModuleResult> {
        tracing::debug!(action = %params.action, "Dispatching clusters action");

        match params.action {
            ClusterAction::List => self.list(params.with_hosts).await,
            ClusterAction::Absent => self.absent(params.cluster_id()).await,
            ClusterAction::Present => self.present(params.data).await,
        }
    }

    async fn list(&self, with_hosts: bool) -> Result<ModuleResult> {
        let response = self.api.list_clusters(&list_query(with_hosts)).await?;

        if !response.is_success() {
            return Err(failed("Error listing clusters", response));
        }

        Ok(ModuleResult::resource("clusters", response.json()?))
    }

    async fn absent(&self, cluster_id: Option<&str>) -> Result<ModuleResult> {
        let Some(cluster_id) = cluster_id else {
            return Err(OperationError::Validation(
                "cluster_id is required for delete action".to_string(),
            ));
        };

        let response = self.api.delete_cluster(cluster_id).await?;

        // Only 204 counts; a 200 means the API did something other than delete.
        if response.status != StatusCode::NO_CONTENT.as_u16() {
            return Err(failed(
                format!("Error deleting cluster_id: {cluster_id}"),
                response,
            ));
        }

        tracing::info!(cluster_id, "Deleted cluster");
        Ok(ModuleResult::resource("clusters", Value::Array(Vec::new())).changed())
    }

    async fn present(&self, data: Option<Map<String, Value>>) -> Result<ModuleResult> {
        let Some(mut payload) = data else {
            return Err(OperationError::Validation(
                "data is required for present action".to_string(),
            ));
        };
        let pull_secret = self.credentials.pull_secret().ok_or_else(|| {
            OperationError::Validation("a pull secret is required for present action".to_string())
        })?;

        payload.insert(
            PULL_SECRET_KEY.to_string(),
            Value::String(pull_secret.to_string()),
        );

        let response = self.api.create_cluster(&payload).await?;

        if !response.is_success() {
            return Err(failed("Error registering cluster", response));
        }

        let cluster = response.json()?;
        let cluster_id = cluster.get("id").and_then(Value::as_str).unwrap_or_default();
        tracing::info!(cluster_id, "Registered cluster");
        Ok(ModuleResult::resource("clusters", cluster).changed())
    }
}

/// Turn a rejected response into a remote error.
pub(crate) fn failed(message: impl Into<String>, response: ApiResponse) -> OperationError {
    let message = message.into();
    tracing::warn!(
        status = response.status,
        error = %message,
        "Assisted Installer API rejected request"
    );
    OperationError::remote(message, response.status, response.body)
}
