use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// Role marker for fields that must never appear on the posting form.
pub const EXCLUDED_POST_ROLE: &str = "exclude_from_post_an_ad";

/// Underlying value type of a posting field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Enum,
    EnumMultiple,
    Float,
    Integer,
    String,
}

/// How the marketplace filters on a field; doubles as the input-shape hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Range,
    SingleChoice,
    MultipleChoice,
    Text,
}

/// Publication state of a field. The API grows new states without notice,
/// so anything unrecognized round-trips through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldState {
    Active,
    Inactive,
    Other(String),
}

impl FieldState {
    pub fn is_active(&self) -> bool {
        matches!(self, FieldState::Active)
    }
}

impl From<String> for FieldState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => FieldState::Active,
            "inactive" => FieldState::Inactive,
            _ => FieldState::Other(raw),
        }
    }
}

impl From<FieldState> for String {
    fn from(state: FieldState) -> Self {
        match state {
            FieldState::Active => "active".to_string(),
            FieldState::Inactive => "inactive".to_string(),
            FieldState::Other(raw) => raw,
        }
    }
}

impl schemars::JsonSchema for FieldState {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "FieldState".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        String::json_schema(generator)
    }
}

/// One selectable option of a choice-backed field. `value` is the storage
/// key; labels are presentation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldChoice {
    pub id: u64,
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_l1: Option<String>,
    #[serde(rename = "displayPriority", default)]
    pub display_priority: i64,
}

impl FieldChoice {
    pub fn display_label(&self, language: Language) -> &str {
        if language == Language::Ar
            && let Some(label) = self.label_l1.as_deref()
            && !label.is_empty()
        {
            label
        } else {
            &self.label
        }
    }
}

/// Descriptor of a single posting-form field as served by the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryField {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_l1: Option<String>,
    pub attribute: String,
    #[serde(rename = "valueType")]
    pub value_type: ValueType,
    #[serde(rename = "filterType")]
    pub filter_type: FilterType,
    #[serde(rename = "isMandatory", default)]
    pub is_mandatory: bool,
    pub state: FieldState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(rename = "displayPriority", default)]
    pub display_priority: i64,
    #[serde(rename = "minValue", default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(rename = "maxValue", default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(rename = "minLength", default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<FieldChoice>>,
}

impl CategoryField {
    /// Whether the field belongs on the posting form at all.
    pub fn is_postable(&self) -> bool {
        self.state.is_active() && !self.roles.iter().any(|role| role == EXCLUDED_POST_ROLE)
    }

    pub fn label(&self, language: Language) -> &str {
        if language == Language::Ar
            && let Some(label) = self.name_l1.as_deref()
            && !label.is_empty()
        {
            label
        } else {
            &self.name
        }
    }

    /// The field's own choice list, ignoring any dependent buckets.
    pub fn static_choices(&self) -> &[FieldChoice] {
        self.choices.as_deref().unwrap_or_default()
    }
}
