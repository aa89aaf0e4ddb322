#![allow(missing_docs)]

pub mod category;
pub mod field;
pub mod locale;
pub mod schema;
pub mod widget;

pub use category::{Category, CategoryTree, NavigationEntry};
pub use field::{CategoryField, EXCLUDED_POST_ROLE, FieldChoice, FieldState, FilterType, ValueType};
pub use locale::Language;
pub use schema::{CategoryFieldSchema, ChoiceBuckets, NO_PARENT_SELECTION, SchemaError};
pub use widget::{Currency, FieldWidget, StorageShape, classify_field};
