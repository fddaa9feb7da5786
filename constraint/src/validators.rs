//! Validation functions keyed by rule identity.
//!
//! Each validator-backed rule in the catalog is paired with exactly one
//! function here. A function answers satisfied/violated for one value and
//! one attachment's parameters; it carries no other state.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use veto_core::{Attributes, Value};

use crate::country::is_country_code;
use crate::error::ConstraintError;

/// A pure validation function: (value under check, attachment parameters).
pub type ValidatorFn =
    Box<dyn Fn(&Value, &Attributes) -> Result<bool, ConstraintError> + Send + Sync>;

/// Validators registered by rule identity.
pub struct Validators {
    validators: HashMap<String, ValidatorFn>,
}

impl Validators {
    /// Create an empty validator set.
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// The validator set for the built-in rules.
    pub fn builtin() -> Self {
        let mut validators = Self::new();
        validators.register(veto_registry::ONE_OF, |value, params| {
            Ok(check_one_of(value, params))
        });
        validators.register(veto_registry::UUID, |value, _| Ok(check_uuid(value)));
        validators.register(veto_registry::COUNTRY_CODE, |value, _| {
            Ok(check_country_code(value))
        });
        validators
    }

    /// Register a validator for a rule. Replaces any previous registration.
    pub fn register<F>(&mut self, rule: impl Into<String>, validator: F)
    where
        F: Fn(&Value, &Attributes) -> Result<bool, ConstraintError> + Send + Sync + 'static,
    {
        self.validators.insert(rule.into(), Box::new(validator));
    }

    /// Get the validator for a rule.
    pub fn get(&self, rule: &str) -> Option<&ValidatorFn> {
        self.validators.get(rule)
    }

    /// Check if a rule has a validator.
    pub fn contains(&self, rule: &str) -> bool {
        self.validators.contains_key(rule)
    }

    /// Get the number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if no validators are registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rules: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        rules.sort_unstable();
        f.debug_struct("Validators").field("rules", &rules).finish()
    }
}

/// Raw text rendering used for set membership and message variables.
/// Unlike `Display`, strings are unquoted.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => s.clone(),
        Value::Timestamp(t) => t.to_string(),
        Value::List(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Membership in the allowed set, case-sensitive exact match.
///
/// Null is valid (absent value). A list is valid when non-empty and every
/// element is a member; an empty string or empty list is invalid.
fn check_one_of(value: &Value, params: &Attributes) -> bool {
    let allowed: Vec<&str> = match params.get("values") {
        Some(Value::List(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => return false,
    };

    match value {
        Value::Null => true,
        Value::List(items) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|item| allowed.contains(&scalar_text(item).as_str()))
        }
        other => allowed.contains(&scalar_text(other).as_str()),
    }
}

const UUID_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(UUID_PATTERN).expect("UUID pattern is valid"))
}

/// Canonical 8-4-4-4-12 hyphenated hex form. Null is valid (absent value);
/// any non-string value is invalid.
fn check_uuid(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => uuid_regex().is_match(s),
        _ => false,
    }
}

/// ISO 3166-1 alpha-2 membership, case-insensitive.
///
/// Null is valid (absent value). A list is valid when non-empty and every
/// element is a valid code.
fn check_country_code(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => is_country_code(s),
        Value::List(items) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|item| item.as_str().map(is_country_code).unwrap_or(false))
        }
        _ => false,
    }
}
