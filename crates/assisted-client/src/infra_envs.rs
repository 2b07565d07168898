//! Dispatcher for the `infra_envs` module.

use assisted_core::{
    Credentials, InfraEnvParams, InfraEnvState, ModuleResult, OperationError, Result,
};
use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::api::AssistedApi;
use crate::clusters::{failed, PULL_SECRET_KEY};

/// Runs infra-env operations against an [`AssistedApi`].
#[derive(Debug)]
pub struct InfraEnvDispatcher<A> {
    api: A,
    credentials: Credentials,
}

impl<A: AssistedApi> InfraEnvDispatcher<A> {
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

    /// Run the operation selected by `params.state`.
    ///
    /// With no state, lists infra-envs, or fetches one when `infra_env_id`
    /// is given.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing required parameters, otherwise
    /// the remote or transport failure of the single request issued.
    pub async fn execute(&self, params: InfraEnvParams) -> Result<ModuleResult> {
        match params.state {
            None => self.read(params.infra_env_id()).await,
            Some(InfraEnvState::Present) => self.create(&params).await,
            Some(InfraEnvState::Absent) => self.delete(params.infra_env_id()).await,
        }
    }

    async fn read(&self, infra_env_id: Option<&str>) -> Result<ModuleResult> {
        let response = match infra_env_id {
            Some(id) => self.api.get_infra_env(id).await?,
            None => self.api.list_infra_envs().await?,
        };

        if !response.is_success() {
            return Err(failed("Error retrieving infra-envs", response));
        }

        Ok(ModuleResult::resource("infra_envs", response.json()?))
    }

    async fn create(&self, params: &InfraEnvParams) -> Result<ModuleResult> {
        let name = params.name().ok_or_else(|| {
            OperationError::Validation("state is present but name is missing".to_string())
        })?;
        let pull_secret = params
            .pull_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.credentials.pull_secret())
            .ok_or_else(|| {
                OperationError::Validation(
                    "state is present but pull_secret is missing".to_string(),
                )
            })?;

        let mut payload = Map::new();
        payload.insert("name".to_string(), Value::String(name.to_string()));
        payload.insert(
            PULL_SECRET_KEY.to_string(),
            Value::String(pull_secret.to_string()),
        );

        let response = self.api.create_infra_env(&payload).await?;

        if !response.is_success() {
            return Err(failed("Error creating infra-envs", response));
        }

        tracing::info!(name, "Created infra-env");
        Ok(ModuleResult::resource("infra_envs", response.json()?).changed())
    }

    async fn delete(&self, infra_env_id: Option<&str>) -> Result<ModuleResult> {
        let Some(infra_env_id) = infra_env_id else {
            return Err(OperationError::Validation(
                "infra_env_id is required for absent state".to_string(),
            ));
        };

        let response = self.api.delete_infra_env(infra_env_id).await?;

        if response.status != StatusCode::NO_CONTENT.as_u16() {
            return Err(failed(
                format!("Error deleting infra_env_id: {infra_env_id}"),
                response,
            ));
        }

        tracing::info!(infra_env_id, "Deleted infra-env");
        Ok(ModuleResult::resource("infra_envs", Value::Array(Vec::new())).changed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ApiCall, MockAssistedApi};
    use serde_json::json;

    fn dispatcher(
        api: MockAssistedApi,
        pull_secret: Option<&str>,
    ) -> InfraEnvDispatcher<MockAssistedApi> {
        let creds = Credentials::new("token")
            .unwrap()
            .with_pull_secret(pull_secret.map(str::to_string));
        InfraEnvDispatcher::new(api, creds)
    }

    fn params(value: Value) -> InfraEnvParams {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn no_state_lists() {
        let d = dispatcher(MockAssistedApi::responding(200, "[]"), None);
        let result = d.execute(params(json!({}))).await.unwrap();

        assert_eq!(result.to_value(), json!({"infra_envs": []}));
        assert_eq!(d.api().calls(), vec![ApiCall::ListInfraEnvs]);
    }

    #[tokio::test]
    async fn no_state_with_id_fetches_one() {
        let d = dispatcher(MockAssistedApi::responding(200, r#"{"id":"ie1"}"#), None);
        let result = d
            .execute(params(json!({"infra_env_id": "ie1"})))
            .await
            .unwrap();

        assert_eq!(result.get("infra_envs"), Some(&json!({"id": "ie1"})));
        assert_eq!(d.api().calls(), vec![ApiCall::GetInfraEnv("ie1".to_string())]);
    }

    #[tokio::test]
    async fn present_sends_name_and_pull_secret() {
        let d = dispatcher(
            MockAssistedApi::responding(201, r#"{"id":"ie2","name":"infra1"}"#),
            Some("env-secret"),
        );
        let result = d
            .execute(params(json!({"state": "present", "name": "infra1", "pull_secret": "blah"})))
            .await
            .unwrap();

        assert!(result.changed);
        let mut expected = Map::new();
        expected.insert("name".into(), json!("infra1"));
        expected.insert("pull_secret".into(), json!("blah"));
        assert_eq!(d.api().calls(), vec![ApiCall::CreateInfraEnv(expected)]);
    }

    #[tokio::test]
    async fn present_falls_back_to_configured_pull_secret() {
        let d = dispatcher(MockAssistedApi::responding(201, "{}"), Some("env-secret"));
        d.execute(params(json!({"state": "present", "name": "infra1"})))
            .await
            .unwrap();

        let calls = d.api().calls();
        let ApiCall::CreateInfraEnv(payload) = &calls[0] else {
            panic!("unexpected call: {calls:?}");
        };
        assert_eq!(payload["pull_secret"], "env-secret");
    }

    #[tokio::test]
    async fn present_requires_name_and_pull_secret() {
        let d = dispatcher(MockAssistedApi::new(), None);

        let err = d
            .execute(params(json!({"state": "present", "pull_secret": "x"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "state is present but name is missing");

        let err = d
            .execute(params(json!({"state": "present", "name": "infra1"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "state is present but pull_secret is missing");

        assert!(d.api().calls().is_empty());
    }

    #[tokio::test]
    async fn absent_succeeds_only_on_204() {
        let d = dispatcher(MockAssistedApi::responding(204, ""), None);
        let result = d
            .execute(params(json!({"state": "absent", "infra_env_id": "ie1"})))
            .await
            .unwrap();
        assert_eq!(result.to_value(), json!({"changed": true, "infra_envs": []}));

        let d = dispatcher(MockAssistedApi::responding(200, "{}"), None);
        let err = d
            .execute(params(json!({"state": "absent", "infra_env_id": "ie1"})))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn absent_without_id_makes_no_call() {
        let d = dispatcher(MockAssistedApi::new(), None);
        let err = d
            .execute(params(json!({"state": "absent"})))
            .await
            .unwrap_err();

        assert!(err.is_local());
        assert!(d.api().calls().is_empty());
    }
}
