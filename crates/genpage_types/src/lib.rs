//! Genpage Types - Level 1 Content Model Types
//!
//! Pure data structures shared by every genpage crate: the destination
//! content model (field kinds, field specifications, models, the model
//! schema) and the typed values written into it (update-operation fields,
//! documents, document requests).
//!
//! ## Architecture Level: LEVEL 1 (Foundation)
//!
//! This crate depends on no other workspace crate and performs no I/O.
//! Conversion logic lives in `genpage`; LLM plumbing lives in
//! `genpage-agentic`.
//!
//! ## Wire shape
//!
//! Update-operation fields serialize in the hosting CMS's shape, tagged by
//! `type`:
//!
//! ```json
//! { "type": "string", "value": "Hello" }
//! { "type": "list", "items": [ ... ] }
//! { "type": "model", "modelName": "HeroSection", "fields": { ... } }
//! { "type": "reference", "refType": "document", "refId": "content/data/team/a.json" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Model name the content model uses for a resolved photographic asset
pub const IMAGE_BLOCK_MODEL: &str = "ImageBlock";

/// Mapping of field name to typed field value
pub type FieldMap = BTreeMap<String, UpdateOperationField>;

// ============================================================================
// FIELD KINDS
// ============================================================================

/// Kind of a field as declared by the content model
///
/// Kinds this system does not understand are kept verbatim in
/// [`FieldKind::Other`] so that the converter can reject them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    String,
    Slug,
    Text,
    Html,
    Url,
    Boolean,
    Number,
    Date,
    Datetime,
    Enum,
    Json,
    Style,
    Color,
    Markdown,
    List,
    Object,
    Model,
    Reference,
    Image,
    /// Any kind not listed above (e.g. `file`, `richText`)
    Other(String),
}

impl FieldKind {
    /// Canonical lowercase name, as written in schema files
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::String => "string",
            FieldKind::Slug => "slug",
            FieldKind::Text => "text",
            FieldKind::Html => "html",
            FieldKind::Url => "url",
            FieldKind::Boolean => "boolean",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Datetime => "datetime",
            FieldKind::Enum => "enum",
            FieldKind::Json => "json",
            FieldKind::Style => "style",
            FieldKind::Color => "color",
            FieldKind::Markdown => "markdown",
            FieldKind::List => "list",
            FieldKind::Object => "object",
            FieldKind::Model => "model",
            FieldKind::Reference => "reference",
            FieldKind::Image => "image",
            FieldKind::Other(name) => name,
        }
    }

    /// Scalar kinds carry their raw value unchanged
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            FieldKind::String
                | FieldKind::Slug
                | FieldKind::Text
                | FieldKind::Html
                | FieldKind::Url
                | FieldKind::Boolean
                | FieldKind::Number
                | FieldKind::Date
                | FieldKind::Datetime
                | FieldKind::Enum
                | FieldKind::Json
                | FieldKind::Style
                | FieldKind::Color
                | FieldKind::Markdown
        )
    }
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => FieldKind::String,
            "slug" => FieldKind::Slug,
            "text" => FieldKind::Text,
            "html" => FieldKind::Html,
            "url" => FieldKind::Url,
            "boolean" => FieldKind::Boolean,
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            "datetime" => FieldKind::Datetime,
            "enum" => FieldKind::Enum,
            "json" => FieldKind::Json,
            "style" => FieldKind::Style,
            "color" => FieldKind::Color,
            "markdown" => FieldKind::Markdown,
            "list" => FieldKind::List,
            "object" => FieldKind::Object,
            "model" => FieldKind::Model,
            "reference" => FieldKind::Reference,
            "image" => FieldKind::Image,
            _ => FieldKind::Other(name),
        }
    }
}

impl From<&str> for FieldKind {
    fn from(name: &str) -> Self {
        FieldKind::from(name.to_string())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CONTENT MODEL SCHEMA
// ============================================================================

/// Declaration of one field of a model
///
/// Used both for named model fields and for the unnamed item spec of a
/// `list` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name (empty for list item specs)
    #[serde(default)]
    pub name: String,
    /// Declared kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Item spec for `list` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<FieldSpec>>,
    /// Nested fields for `object` fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
    /// Allowed model names for `model` and `reference` fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
}

impl FieldSpec {
    /// Create a field spec with no nested structure
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            label: None,
            required: false,
            items: None,
            fields: Vec::new(),
            models: Vec::new(),
        }
    }

    /// Unnamed spec, used as a list item spec
    pub fn item(kind: impl Into<FieldKind>) -> Self {
        Self::new("", kind)
    }

    /// `list` field with the given item spec
    pub fn list(name: impl Into<String>, items: FieldSpec) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(name, FieldKind::List)
        }
    }

    /// `object` field with nested fields
    pub fn object(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            ..Self::new(name, FieldKind::Object)
        }
    }

    /// `model` field accepting the given model names
    pub fn model<S: Into<String>>(name: impl Into<String>, models: impl IntoIterator<Item = S>) -> Self {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            ..Self::new(name, FieldKind::Model)
        }
    }

}

/// A named content type and its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    /// Model category in the hosting CMS (`page`, `data`, `object`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Model {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            model_type: None,
            label: None,
            fields,
        }
    }

    pub fn with_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    /// Look up a field spec by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Read-only mapping from model name to model, supplied by the hosting CMS
///
/// Serialized as a plain list of models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Model>", into = "Vec<Model>")]
pub struct ModelSchema {
    models: HashMap<String, Model>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_models(models: impl IntoIterator<Item = Model>) -> Self {
        Self {
            models: models.into_iter().map(|m| (m.name.clone(), m)).collect(),
        }
    }

    pub fn insert(&mut self, model: Model) {
        self.models.insert(model.name.clone(), model);
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Models sorted by name
    pub fn models(&self) -> Vec<&Model> {
        let mut models: Vec<&Model> = self.models.values().collect();
        models.sort_by(|a, b| a.name.cmp(&b.name));
        models
    }
}

impl From<Vec<Model>> for ModelSchema {
    fn from(models: Vec<Model>) -> Self {
        Self::from_models(models)
    }
}

impl From<ModelSchema> for Vec<Model> {
    fn from(schema: ModelSchema) -> Self {
        let mut models: Vec<Model> = schema.models.into_values().collect();
        models.sort_by(|a, b| a.name.cmp(&b.name));
        models
    }
}

// ============================================================================
// UPDATE-OPERATION FIELDS
// ============================================================================

/// `refType` of every reference; references always target documents
const DOCUMENT_REF_TYPE: &str = "document";

/// Typed value of a single field, ready for persistence
///
/// The tag of every value equals the kind of the field spec it was
/// produced from, see [`UpdateOperationField::kind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireField", into = "WireField")]
pub enum UpdateOperationField {
    /// Any scalar kind; `kind` is always a scalar [`FieldKind`]
    Scalar {
        kind: FieldKind,
        value: serde_json::Value,
    },
    List {
        items: Vec<UpdateOperationField>,
    },
    Object {
        fields: FieldMap,
    },
    Model {
        model_name: String,
        fields: FieldMap,
    },
    /// Reference to another document by id
    Reference {
        ref_id: String,
    },
    /// Resolved image URL, or nothing when no photo could be found
    Image {
        value: Option<String>,
    },
}

impl UpdateOperationField {
    pub fn scalar(kind: FieldKind, value: serde_json::Value) -> Self {
        UpdateOperationField::Scalar { kind, value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        UpdateOperationField::Scalar {
            kind: FieldKind::String,
            value: serde_json::Value::String(value.into()),
        }
    }

    pub fn list(items: Vec<UpdateOperationField>) -> Self {
        UpdateOperationField::List { items }
    }

    pub fn model(model_name: impl Into<String>, fields: FieldMap) -> Self {
        UpdateOperationField::Model {
            model_name: model_name.into(),
            fields,
        }
    }

    pub fn document_ref(ref_id: impl Into<String>) -> Self {
        UpdateOperationField::Reference {
            ref_id: ref_id.into(),
        }
    }

    pub fn image(value: Option<String>) -> Self {
        UpdateOperationField::Image { value }
    }

    /// The tag of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            UpdateOperationField::Scalar { kind, .. } => kind.clone(),
            UpdateOperationField::List { .. } => FieldKind::List,
            UpdateOperationField::Object { .. } => FieldKind::Object,
            UpdateOperationField::Model { .. } => FieldKind::Model,
            UpdateOperationField::Reference { .. } => FieldKind::Reference,
            UpdateOperationField::Image { .. } => FieldKind::Image,
        }
    }

    /// Plain text of a `string`-tagged field
    pub fn as_string(&self) -> Option<&str> {
        match self {
            UpdateOperationField::Scalar {
                kind: FieldKind::String,
                value: serde_json::Value::String(s),
            } => Some(s),
            _ => None,
        }
    }

    pub fn model_name(&self) -> Option<&str> {
        match self {
            UpdateOperationField::Model { model_name, .. } => Some(model_name),
            _ => None,
        }
    }

    /// Nested fields of an `object` or `model` value
    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            UpdateOperationField::Object { fields } | UpdateOperationField::Model { fields, .. } => {
                Some(fields)
            }
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[UpdateOperationField]> {
        match self {
            UpdateOperationField::List { items } => Some(items),
            _ => None,
        }
    }
}

/// Flat serialized form of [`UpdateOperationField`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireField {
    #[serde(rename = "type")]
    kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<UpdateOperationField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ref_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ref_id: Option<String>,
}

impl From<UpdateOperationField> for WireField {
    fn from(field: UpdateOperationField) -> Self {
        let mut wire = WireField {
            kind: field.kind(),
            value: None,
            items: None,
            fields: None,
            model_name: None,
            ref_type: None,
            ref_id: None,
        };
        match field {
            UpdateOperationField::Scalar { value, .. } => wire.value = Some(value),
            UpdateOperationField::List { items } => wire.items = Some(items),
            UpdateOperationField::Object { fields } => wire.fields = Some(fields),
            UpdateOperationField::Model { model_name, fields } => {
                wire.model_name = Some(model_name);
                wire.fields = Some(fields);
            }
            UpdateOperationField::Reference { ref_id } => {
                wire.ref_type = Some(DOCUMENT_REF_TYPE.to_string());
                wire.ref_id = Some(ref_id);
            }
            UpdateOperationField::Image { value } => {
                wire.value = Some(value.map_or(serde_json::Value::Null, serde_json::Value::String));
            }
        }
        wire
    }
}

impl TryFrom<WireField> for UpdateOperationField {
    type Error = String;

    fn try_from(wire: WireField) -> Result<Self, Self::Error> {
        let field = match wire.kind {
            kind if kind.is_scalar() => UpdateOperationField::Scalar {
                kind,
                value: wire.value.unwrap_or(serde_json::Value::Null),
            },
            FieldKind::List => UpdateOperationField::List {
                items: wire.items.unwrap_or_default(),
            },
            FieldKind::Object => UpdateOperationField::Object {
                fields: wire.fields.unwrap_or_default(),
            },
            FieldKind::Model => UpdateOperationField::Model {
                model_name: wire
                    .model_name
                    .ok_or_else(|| "model field without modelName".to_string())?,
                fields: wire.fields.unwrap_or_default(),
            },
            FieldKind::Reference => {
                if let Some(ref_type) = wire.ref_type.filter(|t| t != DOCUMENT_REF_TYPE) {
                    return Err(format!("unsupported refType '{}'", ref_type));
                }
                UpdateOperationField::Reference {
                    ref_id: wire
                        .ref_id
                        .ok_or_else(|| "reference field without refId".to_string())?,
                }
            }
            FieldKind::Image => UpdateOperationField::Image {
                value: wire.value.and_then(|v| v.as_str().map(str::to_string)),
            },
            other => return Err(format!("unsupported field type '{}'", other)),
        };
        Ok(field)
    }
}

// ============================================================================
// DOCUMENTS
// ============================================================================

/// A persisted document as returned by a content source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub fields: FieldMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(id: impl Into<String>, model_name: impl Into<String>, fields: FieldMap) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            model_name: model_name.into(),
            locale: None,
            fields,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request to create a document of `model`
#[derive(Debug, Clone)]
pub struct CreateDocumentRequest {
    /// Fields already converted by the caller
    pub fields: FieldMap,
    /// Model of the document being created
    pub model: Model,
    /// Full content model, supplied by the hosting CMS at call time
    pub schema: Arc<ModelSchema>,
    pub locale: Option<String>,
}

impl CreateDocumentRequest {
    pub fn new(model: Model, schema: Arc<ModelSchema>) -> Self {
        Self {
            fields: FieldMap::new(),
            model,
            schema,
            locale: None,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, field: UpdateOperationField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// A single change applied by `update_document`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "opType", rename_all = "camelCase")]
pub enum UpdateOperation {
    /// Set a top-level field
    Set {
        field_name: String,
        field: UpdateOperationField,
    },
    /// Remove a top-level field
    Unset { field_name: String },
}
