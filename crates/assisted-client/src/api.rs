//! HTTP client for the Assisted Installer REST API.
//!
//! This module provides the [`AssistedApi`] trait the dispatchers call through,
//! and [`HttpAssistedClient`], its reqwest implementation. The client only
//! transports requests: it returns every HTTP status as an [`ApiResponse`] and
//! leaves deciding what counts as success to the caller.

use assisted_core::{Credentials, OperationError, ResourceType, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde_json::{Map, Value};

use crate::config::ApiConfig;
use crate::query::QueryFilter;

/// Status and raw body of an API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, verbatim.
    pub body: String,
}

impl ApiResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for any 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Decode`] carrying the raw body if it is not
    /// valid JSON.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| OperationError::Decode {
            message: format!("Failed to parse response: {e}"),
            response: self.body.clone(),
        })
    }
}

/// Operations against the Assisted Installer API.
///
/// This trait abstracts the HTTP client, allowing the dispatchers to be
/// exercised against a recording mock in tests.
#[async_trait]
pub trait AssistedApi: Send + Sync {
    /// `GET /clusters`.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn list_clusters(&self, query: &QueryFilter) -> Result<ApiResponse>;

    /// `POST /clusters` with `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn create_cluster(&self, payload: &Map<String, Value>) -> Result<ApiResponse>;

    /// `DELETE /clusters/{cluster_id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn delete_cluster(&self, cluster_id: &str) -> Result<ApiResponse>;

    /// `GET /infra-envs`.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn list_infra_envs(&self) -> Result<ApiResponse>;

    /// `GET /infra-envs/{infra_env_id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn get_infra_env(&self, infra_env_id: &str) -> Result<ApiResponse>;

    /// `POST /infra-envs` with `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn create_infra_env(&self, payload: &Map<String, Value>) -> Result<ApiResponse>;

    /// `DELETE /infra-envs/{infra_env_id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn delete_infra_env(&self, infra_env_id: &str) -> Result<ApiResponse>;

    /// `GET /support-levels/{resource_type}`.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    async fn get_support_levels(
        &self,
        resource_type: ResourceType,
        query: &QueryFilter,
    ) -> Result<ApiResponse>;
}

/// reqwest-backed [`AssistedApi`].
///
/// The bearer token is baked into the client's default headers at
/// construction, marked sensitive so it never shows up in debug output.
#[derive(Debug, Clone)]
pub struct HttpAssistedClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpAssistedClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Config`] if the token cannot be used as a
    /// header value or the HTTP client cannot be built.
    pub fn new(config: ApiConfig, credentials: &Credentials) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credentials.api_token()))
            .map_err(|_| {
                OperationError::Config(
                    "API token contains characters not allowed in an HTTP header".to_string(),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| OperationError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get the base URL of the API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send a request and capture status and body.
    async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| OperationError::Transport(format!("{method} {url}: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| OperationError::Transport(format!("{method} {url}: {e}")))?;

        tracing::debug!(method, url, status, "Assisted Installer API response");

        Ok(ApiResponse { status, body })
    }

    async fn get(&self, path: &str, query: &QueryFilter) -> Result<ApiResponse> {
        let url = self.config.url(path);
        let request = self.client.get(&url).query(query.pairs());
        self.send("GET", &url, request).await
    }

    async fn post(&self, path: &str, payload: &Map<String, Value>) -> Result<ApiResponse> {
        let url = self.config.url(path);
        let request = self.client.post(&url).json(payload);
        self.send("POST", &url, request).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse> {
        let url = self.config.url(path);
        let request = self.client.delete(&url);
        self.send("DELETE", &url, request).await
    }
}

#[async_trait]
impl AssistedApi for HttpAssistedClient {
    async fn list_clusters(&self, query: &QueryFilter) -> Result<ApiResponse> {
        self.get("/clusters", query).await
    }

    async fn create_cluster(&self, payload: &Map<String, Value>) -> Result<ApiResponse> {
        self.post("/clusters", payload).await
    }

    async fn delete_cluster(&self, cluster_id: &str) -> Result<ApiResponse> {
        self.delete(&format!("/clusters/{cluster_id}")).await
    }

    async fn list_infra_envs(&self) -> Result<ApiResponse> {
        self.get("/infra-envs", &QueryFilter::new()).await
    }

    async fn get_infra_env(&self, infra_env_id: &str) -> Result<ApiResponse> {
        self.get(&format!("/infra-envs/{infra_env_id}"), &QueryFilter::new())
            .await
    }

    async fn create_infra_env(&self, payload: &Map<String, Value>) -> Result<ApiResponse> {
        self.post("/infra-envs", payload).await
    }

    async fn delete_infra_env(&self, infra_env_id: &str) -> Result<ApiResponse> {
        self.delete(&format!("/infra-envs/{infra_env_id}")).await
    }

    async fn get_support_levels(
        &self,
        resource_type: ResourceType,
        query: &QueryFilter,
    ) -> Result<ApiResponse> {
        self.get(&format!("/support-levels/{}", resource_type.as_str()), query)
            .await
    }
}
