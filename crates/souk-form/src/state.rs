use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Captured answers for a posting form, keyed by field attribute.
///
/// Mutation goes through [`crate::FormSession`] so dependent-value
/// invalidation can never be bypassed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    values: BTreeMap<String, Value>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, attribute: &str) -> Option<&Value> {
        self.values.get(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(attribute, value)| (attribute.as_str(), value))
    }

    pub(crate) fn insert(&mut self, attribute: String, value: Value) {
        self.values.insert(attribute, value);
    }

    pub(crate) fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.values.remove(attribute)
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }
}

/// Whether a stored value counts as unanswered.
///
/// Only null, blank strings and empty arrays are unanswered; `0` and
/// `false` are real answers.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Scalar display form of a stored value; `None` for arrays and objects.
pub fn value_to_display(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
