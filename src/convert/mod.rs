//! Schema-directed layout conversion
//!
//! Generated layouts are untyped JSON. This module walks them against the
//! destination [`ModelSchema`] and produces typed [`UpdateOperationField`]s:
//!
//! ```text
//! component {type, ...} → normalize type label → model lookup
//!                       → field-by-field conversion (recursive, per field kind)
//!                       → model field
//! ```
//!
//! Values the schema cannot place are dropped, not rejected: unknown keys,
//! null values, and components or nested models whose type matches no model.
//! The only conversion error is a field kind the converter does not handle.
//!
//! [`UpdateOperationField`]: genpage_types::UpdateOperationField

mod component;
mod field;
pub mod normalize;

use std::sync::Arc;

use genpage_types::ModelSchema;

use crate::photos::ImageResolver;

pub use normalize::{normalize_type_label, GENERIC_SECTION_MODEL};

/// Converts generated components into typed fields for one schema
///
/// Holds no per-call state; one converter serves a whole layout.
#[derive(Clone)]
pub struct SchemaConverter {
    schema: Arc<ModelSchema>,
    images: ImageResolver,
}

impl SchemaConverter {
    pub fn new(schema: Arc<ModelSchema>, images: ImageResolver) -> Self {
        Self { schema, images }
    }
}
