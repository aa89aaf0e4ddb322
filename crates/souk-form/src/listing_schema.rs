//! JSON Schema for the listing a completed form would submit.
//!
//! The schema is generated from the session, so it only covers the fields
//! visible right now, and choice enums follow the currently resolved
//! buckets. A dependent field whose parent is unanswered gets a plain
//! string schema rather than an empty enum.

use serde_json::{Map, Value, json};

use souk_catalog::{FieldWidget, classify_field};

use crate::session::FormSession;

/// JSON Schema dialect the generated schemas declare.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

pub fn generate(session: &FormSession) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in session.visible_fields() {
        let Some(widget) = classify_field(field) else {
            continue;
        };
        let schema = match widget {
            FieldWidget::SingleSelect | FieldWidget::ButtonRow => {
                choice_schema(session.resolve_choices(field))
            }
            FieldWidget::CheckboxGroup => {
                let items = choice_schema(session.resolve_choices(field));
                json!({ "type": "array", "items": items, "uniqueItems": true })
            }
            FieldWidget::CurrencyAmount { min, max, .. } | FieldWidget::NumberInput { min, max } => {
                number_schema(min, max)
            }
            FieldWidget::TextArea { max_length } | FieldWidget::TextInput { max_length } => {
                let mut schema = Map::new();
                schema.insert("type".to_string(), Value::String("string".to_string()));
                if let Some(max_length) = max_length {
                    schema.insert("maxLength".to_string(), Value::Number(max_length.into()));
                }
                Value::Object(schema)
            }
        };
        properties.insert(field.attribute.clone(), schema);
        if field.is_mandatory {
            required.push(Value::String(field.attribute.clone()));
        }
    }

    json!({
        "$schema": SCHEMA_DIALECT,
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn choice_schema(choices: &[souk_catalog::FieldChoice]) -> Value {
    if choices.is_empty() {
        return json!({ "type": "string" });
    }
    let values: Vec<Value> = choices
        .iter()
        .map(|choice| Value::String(choice.value.clone()))
        .collect();
    json!({ "type": "string", "enum": values })
}

fn number_schema(min: Option<f64>, max: Option<f64>) -> Value {
    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::String("number".to_string()));
    if let Some(min) = min
        && let Some(number) = serde_json::Number::from_f64(min)
    {
        schema.insert("minimum".to_string(), Value::Number(number));
    }
    if let Some(max) = max
        && let Some(number) = serde_json::Number::from_f64(max)
    {
        schema.insert("maximum".to_string(), Value::Number(number));
    }
    Value::Object(schema)
}
