#![allow(missing_docs)]

pub mod listing_schema;
pub mod render;
pub mod session;
pub mod state;
pub mod validate;

use souk_api::ApiError;
use souk_catalog::SchemaError;
use thiserror::Error;

pub use render::{
    RenderChoice, RenderField, RenderPayload, RenderProgress, RenderStatus, build_render_payload,
    render_json_ui, render_text,
};
pub use session::{FormSession, SchemaRequest};
pub use state::{FormState, is_empty_value, value_to_display};
pub use validate::{ValidationError, ValidationResult, validate};

/// Failures while loading a category's posting form.
///
/// A failed load leaves the session without a schema; callers decide when
/// to retry, the session never does so on its own.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to load category fields: {0}")]
    Fetch(#[from] ApiError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
