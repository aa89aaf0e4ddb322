//! Field-kind classification: one closed decision per descriptor, so
//! renderers and validation never re-derive widget choices from strings.

use crate::field::{CategoryField, FilterType, ValueType};

/// Attributes rendered as an exclusive button row instead of a checkbox
/// group; small closed sets like the item condition.
const BUTTON_ROW_ATTRIBUTES: &[&str] = &["new_used", "condition"];

/// Attributes rendered as a multi-line text area.
const LONG_TEXT_ATTRIBUTES: &[&str] = &["description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Lbp,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Lbp => "LBP",
        }
    }
}

/// What a stored value looks like for each widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageShape {
    /// One choice `value`.
    ChoiceValue,
    /// An array of choice `value`s.
    ChoiceValues,
    /// A numeric amount, kept as entered.
    NumericText,
    /// Free text.
    Text,
}

/// Widget assigned to a field, with the input-level parameters renderers
/// need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldWidget {
    SingleSelect,
    ButtonRow,
    CheckboxGroup,
    CurrencyAmount {
        currency: Currency,
        min: Option<f64>,
        max: Option<f64>,
    },
    NumberInput {
        min: Option<f64>,
        max: Option<f64>,
    },
    TextArea {
        max_length: Option<u32>,
    },
    TextInput {
        max_length: Option<u32>,
    },
}

impl FieldWidget {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldWidget::SingleSelect => "single_select",
            FieldWidget::ButtonRow => "button_row",
            FieldWidget::CheckboxGroup => "checkbox_group",
            FieldWidget::CurrencyAmount { .. } => "currency_amount",
            FieldWidget::NumberInput { .. } => "number_input",
            FieldWidget::TextArea { .. } => "text_area",
            FieldWidget::TextInput { .. } => "text_input",
        }
    }

    pub fn storage(&self) -> StorageShape {
        match self {
            FieldWidget::SingleSelect | FieldWidget::ButtonRow => StorageShape::ChoiceValue,
            FieldWidget::CheckboxGroup => StorageShape::ChoiceValues,
            FieldWidget::CurrencyAmount { .. } | FieldWidget::NumberInput { .. } => {
                StorageShape::NumericText
            }
            FieldWidget::TextArea { .. } | FieldWidget::TextInput { .. } => StorageShape::Text,
        }
    }

    /// Whether the widget presents a choice list.
    pub fn has_choices(&self) -> bool {
        matches!(
            self,
            FieldWidget::SingleSelect | FieldWidget::ButtonRow | FieldWidget::CheckboxGroup
        )
    }
}

/// Classifies a field descriptor. `None` means the combination has no
/// widget; such fields are skipped by renderers and validation.
pub fn classify_field(field: &CategoryField) -> Option<FieldWidget> {
    match (field.value_type, field.filter_type) {
        (ValueType::Enum, FilterType::SingleChoice) => Some(FieldWidget::SingleSelect),
        (ValueType::Enum | ValueType::EnumMultiple, FilterType::MultipleChoice) => {
            if BUTTON_ROW_ATTRIBUTES.contains(&field.attribute.as_str()) {
                Some(FieldWidget::ButtonRow)
            } else {
                Some(FieldWidget::CheckboxGroup)
            }
        }
        (ValueType::Float | ValueType::Integer, _) => Some(match field.attribute.as_str() {
            "price" => FieldWidget::CurrencyAmount {
                currency: Currency::Usd,
                min: field.min_value,
                max: field.max_value,
            },
            "secondary_price" => FieldWidget::CurrencyAmount {
                currency: Currency::Lbp,
                min: field.min_value,
                max: field.max_value,
            },
            _ => FieldWidget::NumberInput {
                min: field.min_value,
                max: field.max_value,
            },
        }),
        _ if field.value_type == ValueType::String || field.filter_type == FilterType::Text => {
            if LONG_TEXT_ATTRIBUTES.contains(&field.attribute.as_str()) {
                Some(FieldWidget::TextArea {
                    max_length: field.max_length,
                })
            } else {
                Some(FieldWidget::TextInput {
                    max_length: field.max_length,
                })
            }
        }
        _ => None,
    }
}
