//! Dispatcher for the `support_levels` module.

use assisted_core::{ModuleResult, Result, SupportLevelsParams};
use serde_json::Value;

use crate::api::AssistedApi;
use crate::clusters::failed;
use crate::query::QueryFilter;

/// Build the query filter for a support-levels lookup.
#[must_use]
pub fn support_levels_query(params: &SupportLevelsParams) -> QueryFilter {
    QueryFilter::new()
        .value("openshift_version", Some(params.openshift_version.as_str()))
        .value("cpu_architecture", Some(params.cpu_architecture.as_str()))
        .value("platform_type", params.platform_type.map(|p| p.as_str()))
        .value(
            "external_platform_name",
            params.external_platform_name.as_deref(),
        )
}

/// Queries support levels through an [`AssistedApi`].
#[derive(Debug)]
pub struct SupportLevelsDispatcher<A> {
    api: A,
}

impl<A: AssistedApi> SupportLevelsDispatcher<A> {
    /// Create a dispatcher.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Query the support levels described by `params`.
    ///
    /// The API object's keys become the top-level result keys.
    ///
    /// # Errors
    ///
    /// Returns the remote or transport failure of the request.
    pub async fn execute(&self, params: SupportLevelsParams) -> Result<ModuleResult> {
        let resource_type = params.resource_type;
        let response = self
            .api
            .get_support_levels(resource_type, &support_levels_query(&params))
            .await?;

        if !response.is_success() {
            return Err(failed(
                format!("Error querying {}", resource_type.as_str()),
                response,
            ));
        }

        Ok(match response.json()? {
            Value::Object(fields) => ModuleResult::spread(fields),
            other => ModuleResult::resource("support_levels", other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ApiCall, MockAssistedApi};
    use assisted_core::ResourceType;
    use serde_json::json;

    fn params(value: Value) -> SupportLevelsParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn query_contains_only_set_values() {
        let query = support_levels_query(&params(json!({
            "resource_type": "features",
            "openshift_version": "4.16.19",
            "external_platform_name": "",
        })));
        assert_eq!(query.get("openshift_version"), Some("4.16.19"));
        assert_eq!(query.get("cpu_architecture"), Some("x86_64"));
        assert!(!query.contains("platform_type"));
        assert!(!query.contains("external_platform_name"));
    }

    #[tokio::test]
    async fn result_is_spread() {
        let d = SupportLevelsDispatcher::new(MockAssistedApi::responding(
            200,
            r#"{"architectures":{"X86_64_ARCHITECTURE":"supported"}}"#,
        ));
        let p = params(json!({
            "resource_type": "architectures",
            "openshift_version": "4.16.19",
            "platform_type": "baremetal",
        }));
        let query = support_levels_query(&p);
        let result = d.execute(p).await.unwrap();

        assert_eq!(
            result.to_value(),
            json!({"architectures": {"X86_64_ARCHITECTURE": "supported"}})
        );
        assert_eq!(
            d.api().calls(),
            vec![ApiCall::GetSupportLevels(ResourceType::Architectures, query)]
        );
    }

    #[tokio::test]
    async fn failure_names_resource_type() {
        let d = SupportLevelsDispatcher::new(MockAssistedApi::responding(400, "bad version"));
        let err = d
            .execute(params(json!({
                "resource_type": "features",
                "openshift_version": "0.0",
            })))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error querying features");
        assert_eq!(err.response(), Some("bad version"));
    }
}
