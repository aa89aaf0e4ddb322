use serde_json::{Map, Value, json};

use souk_catalog::{FieldWidget, Language, classify_field};

use crate::listing_schema;
use crate::session::FormSession;
use crate::state::{is_empty_value, value_to_display};
use crate::validate::{ValidationResult, validate};

/// Where the form stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// At least one answer is missing or invalid.
    NeedInput,
    /// Every visible field validates; the listing could be submitted.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// One localized choice for render outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderChoice {
    pub value: String,
    pub label: String,
}

/// One field prepared for rendering: localized label, widget, current
/// value, and the choices resolved for the present answers.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub attribute: String,
    pub label: String,
    pub widget: FieldWidget,
    pub required: bool,
    pub value: Option<Value>,
    pub choices: Vec<RenderChoice>,
}

/// Everything a frontend needs to draw the posting form.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub category: String,
    pub direction: &'static str,
    pub status: RenderStatus,
    pub progress: RenderProgress,
    pub fields: Vec<RenderField>,
    pub validation: ValidationResult,
    pub schema: Value,
}

/// Builds the render payload for the session in the given language.
pub fn build_render_payload(session: &FormSession, language: Language) -> RenderPayload {
    let validation = validate(session);
    let schema = listing_schema::generate(session);

    let mut fields = Vec::new();
    let mut answered = 0usize;
    for field in session.visible_fields() {
        let Some(widget) = classify_field(field) else {
            continue;
        };
        let value = session.state().value(&field.attribute).cloned();
        if value.as_ref().is_some_and(|value| !is_empty_value(value)) {
            answered += 1;
        }
        let choices = if widget.has_choices() {
            session
                .resolve_choices(field)
                .iter()
                .map(|choice| RenderChoice {
                    value: choice.value.clone(),
                    label: choice.display_label(language).to_string(),
                })
                .collect()
        } else {
            Vec::new()
        };
        fields.push(RenderField {
            attribute: field.attribute.clone(),
            label: field.label(language).to_string(),
            widget,
            required: field.is_mandatory,
            value,
            choices,
        });
    }

    let total = fields.len();
    let status = if validation.valid {
        RenderStatus::Complete
    } else {
        RenderStatus::NeedInput
    };

    RenderPayload {
        category: session.category_slug().to_string(),
        direction: if language.is_rtl() { "rtl" } else { "ltr" },
        status,
        progress: RenderProgress { answered, total },
        fields,
        validation,
        schema,
    }
}

/// Renders the payload as a structured JSON value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("attribute".into(), Value::String(field.attribute.clone()));
            map.insert("label".into(), Value::String(field.label.clone()));
            map.insert(
                "widget".into(),
                Value::String(field.widget.as_str().to_string()),
            );
            map.insert("required".into(), Value::Bool(field.required));
            if let Some(value) = &field.value {
                map.insert("value".into(), value.clone());
            }
            if !field.choices.is_empty() {
                let choices = field
                    .choices
                    .iter()
                    .map(|choice| json!({ "value": choice.value, "label": choice.label }))
                    .collect();
                map.insert("choices".into(), Value::Array(choices));
            }
            match field.widget {
                FieldWidget::CurrencyAmount { currency, min, max } => {
                    map.insert(
                        "currency".into(),
                        Value::String(currency.code().to_string()),
                    );
                    insert_bound(&mut map, "min", min);
                    insert_bound(&mut map, "max", max);
                }
                FieldWidget::NumberInput { min, max } => {
                    insert_bound(&mut map, "min", min);
                    insert_bound(&mut map, "max", max);
                }
                FieldWidget::TextArea { max_length } | FieldWidget::TextInput { max_length } => {
                    if let Some(max_length) = max_length {
                        map.insert("max_length".into(), Value::Number(max_length.into()));
                    }
                }
                _ => {}
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "category": payload.category,
        "direction": payload.direction,
        "status": payload.status.as_str(),
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "fields": fields,
        "validation": serde_json::to_value(&payload.validation).unwrap_or(Value::Null),
        "schema": payload.schema,
    })
}

fn insert_bound(map: &mut Map<String, Value>, key: &str, bound: Option<f64>) {
    if let Some(bound) = bound
        && let Some(number) = serde_json::Number::from_f64(bound)
    {
        map.insert(key.to_string(), Value::Number(number));
    }
}

/// Renders the payload as line-based text, one field per line.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Category: {}", payload.category));
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));

    for field in &payload.fields {
        let marker = if field.required { "*" } else { "-" };
        let mut line = format!("{marker} {} <{}>", field.label, field.widget.as_str());
        if let FieldWidget::CurrencyAmount { currency, .. } = field.widget {
            line.push_str(&format!(" [{}]", currency.code()));
        }
        if let Some(value) = &field.value
            && !is_empty_value(value)
        {
            line.push_str(&format!(" = {}", display_value(value)));
        }
        lines.push(line);
        if !field.choices.is_empty() {
            let labels: Vec<&str> = field
                .choices
                .iter()
                .map(|choice| choice.label.as_str())
                .collect();
            lines.push(format!("    options: {}", labels.join(" | ")));
        }
    }

    for attribute in &payload.validation.missing_required {
        lines.push(format!("! required: {attribute}"));
    }
    for error in &payload.validation.errors {
        let attribute = error.attribute.as_deref().unwrap_or("?");
        lines.push(format!("! {}: {}", attribute, error.message));
    }

    lines.join("\n")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(value_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        _ => value_to_display(value).unwrap_or_default(),
    }
}
