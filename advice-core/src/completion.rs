//! Error-first completion values for asynchronous methods.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of an asynchronous method, in error-first form.
///
/// `error` plays the role of the first callback parameter and `results` the
/// remaining ones. A completion counts as failed only when `error` holds a
/// truthy value, so `Some(Value::Null)` or `Some(false)` are successes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Error slot of the completion
    pub error: Option<Value>,
    /// Result values following the error slot
    pub results: Vec<Value>,
}

impl Completion {
    /// Create a successful completion
    pub fn ok(results: impl IntoIterator<Item = Value>) -> Self {
        Self {
            error: None,
            results: results.into_iter().collect(),
        }
    }

    /// Create a failed completion with no results
    pub fn err(error: impl Into<Value>) -> Self {
        Self {
            error: Some(error.into()),
            results: Vec::new(),
        }
    }

    /// Create a completion from its raw error slot and results
    pub fn with_error(error: Option<Value>, results: Vec<Value>) -> Self {
        Self { error, results }
    }

    /// Whether the error slot carries an actual error
    pub fn is_err(&self) -> bool {
        self.error.as_ref().is_some_and(is_truthy)
    }

    /// First result value, if any
    pub fn first(&self) -> Option<&Value> {
        self.results.first()
    }
}

/// Truthiness of an error slot value.
///
/// `null`, `false`, `0` and the empty string are falsy; everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
