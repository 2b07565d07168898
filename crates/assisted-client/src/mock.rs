//! Recording mock of [`AssistedApi`] for tests.

use std::collections::VecDeque;

use assisted_core::{OperationError, ResourceType, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::api::{ApiResponse, AssistedApi};
use crate::query::QueryFilter;

/// A call observed by [`MockAssistedApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    /// `GET /clusters`
    ListClusters(QueryFilter),
    /// `POST /clusters`
    CreateCluster(Map<String, Value>),
    /// `DELETE /clusters/{id}`
    DeleteCluster(String),
    /// `GET /infra-envs`
    ListInfraEnvs,
    /// `GET /infra-envs/{id}`
    GetInfraEnv(String),
    /// `POST /infra-envs`
    CreateInfraEnv(Map<String, Value>),
    /// `DELETE /infra-envs/{id}`
    DeleteInfraEnv(String),
    /// `GET /support-levels/{resource_type}`
    GetSupportLevels(ResourceType, QueryFilter),
}

/// Replays queued responses in order and records every call.
///
/// A call with no queued response fails with a transport error.
#[derive(Debug, Default)]
pub struct MockAssistedApi {
    responses: Mutex<VecDeque<ApiResponse>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockAssistedApi {
    /// Create a mock with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers the next call with `status` and `body`.
    #[must_use]
    pub fn responding(status: u16, body: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_response(status, body);
        mock
    }

    /// Queue a response.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .push_back(ApiResponse::new(status, body));
    }

    /// Every call made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ApiCall) -> Result<ApiResponse> {
        self.calls.lock().push(call);
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| OperationError::Transport("no mock response queued".to_string()))
    }
}

#[async_trait]
impl AssistedApi for MockAssistedApi {
    async fn list_clusters(&self, query: &QueryFilter) -> Result<ApiResponse> {
        self.record(ApiCall::ListClusters(query.clone()))
    }

    async fn create_cluster(&self, payload: &Map<String, Value>) -> Result<ApiResponse> {
        self.record(ApiCall::CreateCluster(payload.clone()))
    }

    async fn delete_cluster(&self, cluster_id: &str) -> Result<ApiResponse> {
        self.record(ApiCall::DeleteCluster(cluster_id.to_string()))
    }

    async fn list_infra_envs(&self) -> Result<ApiResponse> {
        self.record(ApiCall::ListInfraEnvs)
    }

    async fn get_infra_env(&self, infra_env_id: &str) -> Result<ApiResponse> {
        self.record(ApiCall::GetInfraEnv(infra_env_id.to_string()))
    }

    async fn create_infra_env(&self, payload: &Map<String, Value>) -> Result<ApiResponse> {
        self.record(ApiCall::CreateInfraEnv(payload.clone()))
    }

    async fn delete_infra_env(&self, infra_env_id: &str) -> Result<ApiResponse> {
        self.record(ApiCall::DeleteInfraEnv(infra_env_id.to_string()))
    }

    async fn get_support_levels(
        &self,
        resource_type: ResourceType,
        query: &QueryFilter,
    ) -> Result<ApiResponse> {
        self.record(ApiCall::GetSupportLevels(resource_type, query.clone()))
    }
}
