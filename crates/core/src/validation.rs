//! Collected field-level validation results.

use std::collections::BTreeMap;

use serde::Serialize;

/// A mapping from field name to human-readable error message.
///
/// Rule sets are evaluated collect-all rather than fail-fast: every
/// violated rule contributes one entry keyed by the field it concerns,
/// so a form can show all problems at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// An empty (passing) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`. A later violation for the same
    /// field replaces the earlier message.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// The message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Whether a violation was recorded for `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Number of violated fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Drop all recorded violations.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterate over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
