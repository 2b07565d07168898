//! Ansible binary-module protocol.
//!
//! The controller runs a binary module with a single argument: the path of a
//! JSON file holding the module arguments plus its own `_ansible_*` keys. The
//! module answers with exactly one JSON document on stdout.

use std::path::Path;

use anyhow::Context;
use assisted_core::{ArgumentSpec, ModuleFailure, ModuleResult, OperationError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Prefix of keys reserved for the controller.
const INTERNAL_PREFIX: &str = "_ansible_";

/// Wrapper key used by new-style module argument documents.
const WRAPPER_KEY: &str = "ANSIBLE_MODULE_ARGS";

/// Parsed module arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleArgs {
    check_mode: bool,
    params: Map<String, Value>,
}

impl ModuleArgs {
    /// Parse an args document.
    ///
    /// Accepts both a flat object and one wrapped in `ANSIBLE_MODULE_ARGS`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the document is not a JSON object.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            OperationError::Validation(format!("failed to parse module arguments: {e}"))
        })?;

        let Value::Object(mut document) = value else {
            return Err(OperationError::Validation(
                "module arguments must be a JSON object".to_string(),
            ));
        };

        match document.remove(WRAPPER_KEY) {
            None => {}
            Some(Value::Object(inner)) => document = inner,
            Some(_) => {
                return Err(OperationError::Validation(format!(
                    "{WRAPPER_KEY} must be a JSON object"
                )));
            }
        }

        let mut check_mode = false;
        let mut params = Map::new();
        for (key, value) in document {
            if key == "_ansible_check_mode" {
                check_mode = value.as_bool().unwrap_or(false);
            } else if !key.starts_with(INTERNAL_PREFIX) {
                params.insert(key, value);
            }
        }

        Ok(Self { check_mode, params })
    }

    /// Whether the controller asked for a dry run.
    #[must_use]
    pub const fn check_mode(&self) -> bool {
        self.check_mode
    }

    /// Deserialize the parameters for `module`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming any undeclared parameter, or
    /// describing the first invalid value.
    pub fn into_params<P>(self, module: &str) -> Result<P>
    where
        P: DeserializeOwned + ArgumentSpec,
    {
        let mut unsupported: Vec<&str> = self
            .params
            .keys()
            .map(String::as_str)
            .filter(|key| !P::PARAMETERS.iter().any(|declared| declared == key))
            .collect();

        if !unsupported.is_empty() {
            unsupported.sort_unstable();
            return Err(OperationError::Validation(format!(
                "Unsupported parameters for ({module}) module: {}. Supported parameters include: {}.",
                unsupported.join(", "),
                P::PARAMETERS.join(", ")
            )));
        }

        serde_json::from_value(Value::Object(self.params)).map_err(|e| {
            OperationError::Validation(format!("invalid parameters for ({module}) module: {e}"))
        })
    }
}

/// Read the args file the controller passed on the command line.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_args_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read module arguments from {}", path.display()))
}

/// The document a module prints, and whether it reports failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// JSON printed on stdout.
    pub document: Value,
    /// Whether the module failed.
    pub failed: bool,
}

impl Outcome {
    /// Outcome of a finished operation.
    #[must_use]
    pub fn from_result(result: &Result<ModuleResult>) -> Self {
        match result {
            Ok(result) => Self {
                document: result.to_value(),
                failed: false,
            },
            Err(err) => Self::failure(&ModuleFailure::from(err)),
        }
    }

    /// Outcome for a failure document.
    #[must_use]
    pub fn failure(failure: &ModuleFailure) -> Self {
        Self {
            document: serde_json::to_value(failure).unwrap_or(Value::Null),
            failed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assisted_core::{ClusterAction, ClustersParams};

    #[test]
    fn internal_keys_are_stripped() {
        let args = ModuleArgs::parse(
            r#"{"action":"list","_ansible_check_mode":false,"_ansible_verbosity":3}"#,
        )
        .unwrap();
        assert!(!args.check_mode());

        let params: ClustersParams = args.into_params("clusters").unwrap();
        assert_eq!(params.action, ClusterAction::List);
    }

    #[test]
    fn wrapped_arguments_are_unwrapped() {
        let args = ModuleArgs::parse(
            r#"{"ANSIBLE_MODULE_ARGS":{"action":"absent","cluster_id":"x","_ansible_check_mode":true}}"#,
        )
        .unwrap();
        assert!(args.check_mode());

        let params: ClustersParams = args.into_params("clusters").unwrap();
        assert_eq!(params.action, ClusterAction::Absent);
    }

    #[test]
    fn unsupported_parameters_are_listed() {
        let err = ModuleArgs::parse(r#"{"zone":"a","action":"list","colour":"b"}"#)
            .unwrap()
            .into_params::<ClustersParams>("clusters")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported parameters for (clusters) module: colour, zone. \
             Supported parameters include: action, cluster_id, data, with_hosts."
        );
    }

    #[test]
    fn invalid_value_is_validation_error() {
        let err = ModuleArgs::parse(r#"{"action":"delete"}"#)
            .unwrap()
            .into_params::<ClustersParams>("clusters")
            .unwrap_err();
        assert!(matches!(err, OperationError::Validation(_)));
        assert!(err.to_string().contains("got: delete"));
    }

    #[test]
    fn non_object_wrapper_rejected() {
        for raw in [
            r#"{"ANSIBLE_MODULE_ARGS": "action=list"}"#,
            r#"{"ANSIBLE_MODULE_ARGS": null, "action": "list"}"#,
        ] {
            let err = ModuleArgs::parse(raw).unwrap_err();
            assert!(matches!(err, OperationError::Validation(_)));
            assert_eq!(err.to_string(), "ANSIBLE_MODULE_ARGS must be a JSON object");
        }
    }

    #[test]
    fn non_object_document_rejected() {
        assert!(ModuleArgs::parse("[1, 2]").is_err());
        assert!(ModuleArgs::parse("action=list").is_err());
    }

    #[test]
    fn failure_outcome() {
        let err = OperationError::remote("Error registering cluster", 400, "bad");
        let outcome = Outcome::from_result(&Err(err));
        assert!(outcome.failed);
        assert_eq!(outcome.document["msg"], "Error registering cluster");
        assert_eq!(outcome.document["response"], "bad");
    }
}
