//! Query-filter construction.
//!
//! Only recognized keys ever reach the query string, and only when their value
//! is truthy: `false` flags and empty strings are left out entirely.

/// An ordered set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pairs: Vec<(&'static str, String)>,
}

impl QueryFilter {
    /// An empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key=true` when `enabled`.
    #[must_use]
    pub fn flag(mut self, key: &'static str, enabled: bool) -> Self {
        if enabled {
            self.pairs.push((key, "true".to_string()));
        }
        self
    }

    /// Add `key=value` when the value is present and non-empty.
    #[must_use]
    pub fn value(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Returns true if `key` is part of the filter.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| *k == key)
    }

    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if no parameter was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs in insertion order, ready for `RequestBuilder::query`.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_included_only_when_true() {
        assert!(QueryFilter::new().flag("with_hosts", true).contains("with_hosts"));
        assert!(!QueryFilter::new().flag("with_hosts", false).contains("with_hosts"));
        assert!(QueryFilter::new().is_empty());
    }

    #[test]
    fn empty_values_skipped() {
        let filter = QueryFilter::new()
            .value("openshift_version", Some("4.16"))
            .value("platform_type", None)
            .value("external_platform_name", Some(""));
        assert_eq!(filter.pairs().len(), 1);
        assert_eq!(filter.get("openshift_version"), Some("4.16"));
    }
}
