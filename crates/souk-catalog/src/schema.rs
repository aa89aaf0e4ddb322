//! Normalized posting-field schema for one category.
//!
//! The `categoryFields` endpoint keys its body by an opaque category id and
//! serves dependent choices in two shapes (a flat list, or a map keyed by the
//! parent field's value). Everything is normalized here, once, at the
//! boundary; downstream code never sniffs shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::field::{CategoryField, FieldChoice};

/// Bucket key for dependent choices that apply while the parent field has no
/// selected value.
pub const NO_PARENT_SELECTION: &str = "";

/// Dependent choices for one field, keyed by the parent field's value.
pub type ChoiceBuckets = BTreeMap<String, Vec<FieldChoice>>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to decode category fields payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Field schema of a single category after boundary normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryFieldSchema {
    pub fields: Vec<CategoryField>,
    /// Child attribute -> parent value -> choices.
    pub dependent_choices: BTreeMap<String, ChoiceBuckets>,
    /// Child attribute -> parent attribute.
    pub parent_lookup: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawCategoryEntry {
    #[serde(rename = "flatFields", default)]
    flat_fields: Vec<CategoryField>,
    #[serde(rename = "childrenFields", default)]
    children_fields: BTreeMap<String, RawChoiceBuckets>,
    #[serde(rename = "parentFieldLookup", default)]
    parent_field_lookup: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChoiceBuckets {
    ByParentValue(BTreeMap<String, Vec<FieldChoice>>),
    Flat(Vec<FieldChoice>),
}

impl CategoryFieldSchema {
    /// Builds the schema from a raw `categoryFields` response body.
    ///
    /// The body is an object with exactly one top-level key (the category
    /// id); the first entry is taken. An empty object yields the empty
    /// schema rather than an error.
    pub fn from_response(body: Value) -> Result<Self, SchemaError> {
        let entries: BTreeMap<String, RawCategoryEntry> = serde_json::from_value(body)?;
        let Some((_, entry)) = entries.into_iter().next() else {
            return Ok(Self::default());
        };

        let dependent_choices = entry
            .children_fields
            .into_iter()
            .map(|(attribute, raw)| {
                let buckets = match raw {
                    RawChoiceBuckets::ByParentValue(buckets) => buckets,
                    RawChoiceBuckets::Flat(choices) => {
                        BTreeMap::from([(NO_PARENT_SELECTION.to_string(), choices)])
                    }
                };
                (attribute, buckets)
            })
            .collect();

        Ok(Self {
            fields: entry.flat_fields,
            dependent_choices,
            parent_lookup: entry.parent_field_lookup,
        })
    }

    /// Fields that belong on the posting form, in display order. The sort is
    /// stable, so equal priorities keep their server order.
    pub fn postable_fields(&self) -> Vec<&CategoryField> {
        let mut fields: Vec<&CategoryField> = self
            .fields
            .iter()
            .filter(|field| field.is_postable())
            .collect();
        fields.sort_by_key(|field| field.display_priority);
        fields
    }

    pub fn field(&self, attribute: &str) -> Option<&CategoryField> {
        self.fields.iter().find(|field| field.attribute == attribute)
    }

    /// Whether the field's choices come from dependent buckets rather than
    /// its own static list.
    pub fn is_dependent(&self, attribute: &str) -> bool {
        self.dependent_choices.contains_key(attribute)
    }

    pub fn parent_of(&self, attribute: &str) -> Option<&str> {
        self.parent_lookup.get(attribute).map(String::as_str)
    }

    /// Attributes that declare `attribute` as their parent.
    pub fn children_of<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a str> {
        self.parent_lookup
            .iter()
            .filter_map(move |(child, parent)| (parent.as_str() == attribute).then_some(child.as_str()))
    }

    /// Dependent bucket for a field given the parent's current value; the
    /// sentinel bucket applies while the parent is unanswered. `None` means
    /// the field is not dependency-driven at all.
    pub fn dependent_bucket(
        &self,
        attribute: &str,
        parent_value: Option<&str>,
    ) -> Option<&[FieldChoice]> {
        let buckets = self.dependent_choices.get(attribute)?;
        let key = parent_value.unwrap_or(NO_PARENT_SELECTION);
        Some(buckets.get(key).map(Vec::as_slice).unwrap_or(&[]))
    }
}
