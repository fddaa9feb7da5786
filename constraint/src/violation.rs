//! Constraint violation reports.

use veto_core::{Path, Value};

/// A report that a value failed a constraint at a declaration path.
///
/// Violations are collected, never fatal: a validation pass reports every
/// violated constraint it evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Identity of the violated rule.
    pub rule: String,
    /// Path from the type root to the failing declaration.
    pub path: Path,
    /// Resolved failure message.
    pub message: String,
    /// The value that failed, when the rule checks one.
    pub invalid_value: Option<Value>,
    /// Groups in effect for the violated constraint.
    pub groups: Vec<String>,
    /// Payload tags declared on the violated constraint.
    pub payload: Vec<String>,
}

impl Violation {
    /// Create a new violation.
    pub fn new(rule: impl Into<String>, path: Path, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            path,
            message: message.into(),
            invalid_value: None,
            groups: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Attach the failing value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.invalid_value = Some(value);
        self
    }

    /// Attach the groups in effect.
    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    /// Attach payload tags.
    pub fn with_payload(mut self, payload: Vec<String>) -> Self {
        self.payload = payload;
        self
    }
}

/// Collection of violations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create a new empty violations collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check if there are any violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Get all violations.
    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    /// Get violations for one rule.
    pub fn for_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }

    /// Rendered paths of all violations.
    pub fn paths(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.path.to_string()).collect()
    }

    /// Messages of all violations.
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Merge another violations collection.
    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
