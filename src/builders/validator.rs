use anyhow::Result;
use serde_json::Value;
use std::collections::HashSet;

use crate::core::config::LedgerConfig;
use crate::core::error::ValidationError;

/// True only for integral numbers. Text, floats, booleans and null are rejected.
pub fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

/// True only for strings.
pub fn is_text(value: &Value) -> bool {
    value.is_string()
}

/// Extracts an integer field or names the field that failed.
///
/// Integers above `i64::MAX` pass [`is_integer`] but cannot be stored, so they
/// are rejected here.
pub fn integer(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    value
        .as_i64()
        .ok_or(ValidationError::NotInteger { field })
}

/// Extracts a text field or names the field that failed.
pub fn text(field: &'static str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(ValidationError::NotText { field }),
    }
}

/// Whether an optional update field counts as "not supplied".
///
/// Absent values and falsy ones (`null`, `""`, `0`, `false`, empty arrays and
/// objects) all leave the stored field unchanged. A field can therefore never be
/// updated to an empty string or to zero.
pub fn is_unset(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
    }
}

/// An optional text field of an update: `None` when unset, an error when set to
/// something that is not a string.
pub fn optional_text(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if !is_unset(Some(&v)) => text(field, &v).map(Some),
        _ => Ok(None),
    }
}

/// Integer counterpart of [`optional_text`].
pub fn optional_integer(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<i64>, ValidationError> {
    match value {
        Some(v) if !is_unset(Some(&v)) => integer(field, &v).map(Some),
        _ => Ok(None),
    }
}

/// The `ConfigValidator` trait defines the public interface for validating the
/// ledger configuration before any collection is opened.
pub trait ConfigValidator {
    /// Performs a full validation of the configuration and returns a list of
    /// issues found. An empty list means the configuration is usable.
    fn validate_config(&self, config: &LedgerConfig) -> Result<Vec<String>>;
}

/// Checks the configuration for an unsupported version and unusable
/// collection names.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Collection names become file names inside the data directory, so they must
    /// be non-empty, distinct, and free of path separators.
    fn check_collection_names(&self, config: &LedgerConfig) -> Vec<String> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for (kind, name) in config.storage.collection_names() {
            if name.trim().is_empty() {
                issues.push(format!("Collection name for {kind} records is empty"));
                continue;
            }
            if name.contains(['/', '\\']) {
                issues.push(format!(
                    "Collection name '{name}' for {kind} records contains a path separator"
                ));
            }
            if !seen.insert(name) {
                issues.push(format!("Collection name '{name}' is used more than once"));
            }
        }
        issues
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for StandardValidator {
    fn validate_config(&self, config: &LedgerConfig) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if config.version != "1.0" {
            issues.push(format!("Unsupported config version: {}", config.version));
        }
        issues.extend(self.check_collection_names(config));

        Ok(issues)
    }
}
