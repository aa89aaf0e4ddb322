use serde_json::Value;
use tracing::debug;

use souk_api::MarketSource;
use souk_catalog::{CategoryField, CategoryFieldSchema, FieldChoice};

use crate::FormError;
use crate::state::{FormState, value_to_display};

/// Ticket tying an in-flight schema fetch to the selection that issued it.
///
/// Selections are numbered; a response presented with an old ticket is
/// discarded by [`FormSession::install_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRequest {
    generation: u64,
}

/// One posting form in progress: the selected category's field schema plus
/// the answers captured so far.
#[derive(Debug, Default)]
pub struct FormSession {
    category_slug: String,
    schema: CategoryFieldSchema,
    state: FormState,
    generation: u64,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_slug(&self) -> &str {
        &self.category_slug
    }

    pub fn schema(&self) -> &CategoryFieldSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Switches the session to a category.
    ///
    /// Answers and the previous schema are dropped immediately, and the
    /// returned ticket is the only one the next [`Self::install_schema`]
    /// accepts.
    pub fn select_category(&mut self, slug: impl Into<String>) -> SchemaRequest {
        self.category_slug = slug.into();
        self.schema = CategoryFieldSchema::default();
        self.state.clear();
        self.generation += 1;
        SchemaRequest {
            generation: self.generation,
        }
    }

    /// Installs a fetched schema, unless the selection has moved on since
    /// the ticket was issued. Returns whether the schema was accepted.
    pub fn install_schema(&mut self, request: SchemaRequest, schema: CategoryFieldSchema) -> bool {
        if request.generation != self.generation {
            debug!(
                stale = request.generation,
                current = self.generation,
                "dropping superseded schema response"
            );
            return false;
        }
        self.schema = schema;
        true
    }

    /// Selects `slug` and loads its field schema from `source`.
    ///
    /// An empty slug is the placeholder option, not an error: the session
    /// ends up selected with no fields.
    pub async fn load_category(
        &mut self,
        source: &dyn MarketSource,
        slug: &str,
    ) -> Result<(), FormError> {
        let request = self.select_category(slug);
        if slug.is_empty() {
            return Ok(());
        }
        let body = source.category_fields(slug).await?;
        let schema = CategoryFieldSchema::from_response(body)?;
        let fields = schema.fields.len();
        if self.install_schema(request, schema) {
            debug!(category = %self.category_slug, fields, "installed field schema");
        }
        Ok(())
    }

    /// Fields to render, in display order.
    pub fn visible_fields(&self) -> Vec<&CategoryField> {
        self.schema.postable_fields()
    }

    /// Choices for a field right now.
    ///
    /// Dependent fields get the bucket selected by their parent's current
    /// value, the no-selection bucket while the parent is unanswered, and
    /// never the parent's own choice list. Everything else gets its static
    /// list.
    pub fn resolve_choices<'a>(&'a self, field: &'a CategoryField) -> &'a [FieldChoice] {
        if self.schema.is_dependent(&field.attribute) {
            let parent_value = self
                .schema
                .parent_of(&field.attribute)
                .and_then(|parent| self.state.value(parent))
                .and_then(value_to_display);
            self.schema
                .dependent_bucket(&field.attribute, parent_value.as_deref())
                .unwrap_or(&[])
        } else {
            field.static_choices()
        }
    }

    /// Stores a value, then synchronously drops the stored answers of every
    /// field that depends on this one, transitively. Rewriting the same
    /// value cascades all the same.
    pub fn set_value(&mut self, attribute: &str, value: Value) {
        self.state.insert(attribute.to_string(), value);
        self.invalidate_dependents(attribute);
    }

    /// Removes a stored value; dependents are invalidated exactly as on a
    /// write.
    pub fn clear_value(&mut self, attribute: &str) {
        self.state.remove(attribute);
        self.invalidate_dependents(attribute);
    }

    fn invalidate_dependents(&mut self, attribute: &str) {
        let mut pending = vec![attribute.to_string()];
        while let Some(parent) = pending.pop() {
            // A field listed as its own parent must not erase itself.
            let stale: Vec<String> = self
                .schema
                .children_of(&parent)
                .filter(|child| *child != parent.as_str() && self.state.contains(child))
                .map(str::to_string)
                .collect();
            for child in stale {
                self.state.remove(&child);
                debug!(field = %child, parent = %parent, "dropped dependent answer");
                pending.push(child);
            }
        }
    }
}
