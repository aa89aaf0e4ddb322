use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use souk_catalog::{CategoryField, StorageShape, classify_field};

use crate::session::FormSession;
use crate::state::is_empty_value;

/// One validation failure, tied to the field that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_fields: Vec<String>,
}

/// Validates the session's answers against the visible form.
///
/// Checks required coverage, stored value shapes, and membership in the
/// currently resolved choice lists. Numeric min/max bounds belong to the
/// inputs and are not enforced here. Choice membership is skipped while a
/// field's resolved list is empty, since there is nothing to check against.
pub fn validate(session: &FormSession) -> ValidationResult {
    let mut errors = Vec::new();
    let mut missing_required = Vec::new();
    let mut known = BTreeSet::new();

    for field in session.visible_fields() {
        let Some(widget) = classify_field(field) else {
            continue;
        };
        known.insert(field.attribute.clone());

        match session.state().value(&field.attribute) {
            None => {
                if field.is_mandatory {
                    missing_required.push(field.attribute.clone());
                }
            }
            Some(value) if is_empty_value(value) => {
                if field.is_mandatory {
                    missing_required.push(field.attribute.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_value(session, field, widget.storage(), value) {
                    errors.push(error);
                }
            }
        }
    }

    let unknown_fields: Vec<String> = session
        .state()
        .iter()
        .map(|(attribute, _)| attribute.to_string())
        .filter(|attribute| !known.contains(attribute))
        .collect();

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

fn validate_value(
    session: &FormSession,
    field: &CategoryField,
    storage: StorageShape,
    value: &Value,
) -> Option<ValidationError> {
    match storage {
        StorageShape::ChoiceValue => {
            let Some(text) = value.as_str() else {
                return Some(field_error(
                    field,
                    "expected a single choice value",
                    "type_mismatch",
                ));
            };
            choice_mismatch(session, field, text)
        }
        StorageShape::ChoiceValues => {
            let Some(items) = value.as_array() else {
                return Some(field_error(
                    field,
                    "expected a list of choice values",
                    "type_mismatch",
                ));
            };
            for item in items {
                let Some(text) = item.as_str() else {
                    return Some(field_error(
                        field,
                        "expected choice values as strings",
                        "type_mismatch",
                    ));
                };
                if let Some(error) = choice_mismatch(session, field, text) {
                    return Some(error);
                }
            }
            None
        }
        StorageShape::NumericText => {
            let numeric = match value {
                Value::Number(_) => true,
                Value::String(text) => text.trim().parse::<f64>().is_ok(),
                _ => false,
            };
            (!numeric).then(|| field_error(field, "expected a numeric amount", "not_a_number"))
        }
        StorageShape::Text => {
            let Some(text) = value.as_str() else {
                return Some(field_error(field, "expected text", "type_mismatch"));
            };
            if let Some(max_length) = field.max_length
                && text.chars().count() > max_length as usize
            {
                return Some(field_error(
                    field,
                    format!("text exceeds {max_length} characters"),
                    "max_length",
                ));
            }
            None
        }
    }
}

fn choice_mismatch(
    session: &FormSession,
    field: &CategoryField,
    value: &str,
) -> Option<ValidationError> {
    let choices = session.resolve_choices(field);
    if choices.is_empty() || choices.iter().any(|choice| choice.value == value) {
        return None;
    }
    Some(field_error(
        field,
        "value is not an available choice",
        "choice_mismatch",
    ))
}

fn field_error(field: &CategoryField, message: impl Into<String>, code: &str) -> ValidationError {
    ValidationError {
        attribute: Some(field.attribute.clone()),
        path: Some(format!("/{}", field.attribute)),
        message: message.into(),
        code: Some(code.to_string()),
    }
}
