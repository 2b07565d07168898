//! Module result documents.
//!
//! A module prints exactly one of these to stdout: a [`ModuleResult`] when the
//! operation succeeded, or a [`ModuleFailure`] built from an
//! [`OperationError`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::OperationError;

/// Successful module outcome.
///
/// Named resources (`clusters`, `infra_envs`) and any spread API keys live in
/// `fields`, which is flattened into the top-level document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleResult {
    /// Whether remote state was mutated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub changed: bool,
    /// Whether the module declined to run (check mode).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    /// Human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Result payload keys.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ModuleResult {
    /// A result carrying `value` under `key`.
    #[must_use]
    pub fn resource(key: impl Into<String>, value: Value) -> Self {
        let mut fields = Map::new();
        fields.insert(key.into(), value);
        Self {
            fields,
            ..Self::default()
        }
    }

    /// A result whose keys are taken from an API object.
    #[must_use]
    pub fn spread(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// A skipped result with an explanation.
    #[must_use]
    pub fn skipped(msg: impl Into<String>) -> Self {
        Self {
            skipped: true,
            msg: Some(msg.into()),
            ..Self::default()
        }
    }

    /// Mark the result as having changed remote state.
    #[must_use]
    pub fn changed(mut self) -> Self {
        self.changed = true;
        self
    }

    /// Look up a payload key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The result as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Failed module outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleFailure {
    /// Always true.
    pub failed: bool,
    /// Failure message.
    pub msg: String,
    /// HTTP status of the failed response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Raw response body of the failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ModuleFailure {
    /// A failure with a message and no server response.
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            failed: true,
            msg: msg.into(),
            status: None,
            response: None,
        }
    }
}

impl From<&OperationError> for ModuleFailure {
    fn from(err: &OperationError) -> Self {
        Self {
            failed: true,
            msg: err.to_string(),
            status: err.status(),
            response: err.response().map(str::to_string),
        }
    }
}
