//! Field conversion
//!
//! One arm per [`FieldKind`]. Composite kinds recurse; sibling values (list
//! items, object entries) are converted concurrently and reassembled in
//! source order.

use futures::future::{try_join_all, BoxFuture, FutureExt};
use genpage_types::{FieldKind, FieldMap, FieldSpec, UpdateOperationField, IMAGE_BLOCK_MODEL};
use serde_json::{Map, Value};

use super::SchemaConverter;
use crate::error::{PageError, PageResult};
use crate::photos::resolver::description_text;

/// Key carrying the model discriminator inside generated values
pub(crate) const TYPE_KEY: &str = "type";

impl SchemaConverter {
    /// Convert one untyped value against its field spec
    ///
    /// `Ok(None)` means the value converts to nothing and should be left
    /// out by the caller.
    pub fn convert_field<'a>(
        &'a self,
        value: &'a Value,
        spec: &'a FieldSpec,
    ) -> BoxFuture<'a, PageResult<Option<UpdateOperationField>>> {
        async move {
            let field = match &spec.kind {
                kind if kind.is_scalar() => UpdateOperationField::scalar(kind.clone(), value.clone()),
                FieldKind::List => self.convert_list(value, spec).await?,
                FieldKind::Object => UpdateOperationField::Object {
                    fields: self.convert_fields(value, &spec.fields).await?,
                },
                FieldKind::Model => return self.convert_model(value, spec).await,
                FieldKind::Reference => UpdateOperationField::document_ref(reference_id(value)),
                FieldKind::Image => UpdateOperationField::image(self.images.resolve(value).await),
                other => {
                    return Err(PageError::UnsupportedFieldKind {
                        field: spec.name.clone(),
                        kind: other.to_string(),
                    })
                }
            };
            Ok(Some(field))
        }
        .boxed()
    }

    /// Convert a mapping against a field list, skipping unknown keys and nulls
    pub async fn convert_fields(&self, value: &Value, specs: &[FieldSpec]) -> PageResult<FieldMap> {
        match value.as_object() {
            Some(map) => self.convert_map(map, specs, None).await,
            None => Ok(FieldMap::new()),
        }
    }

    pub(crate) async fn convert_map(
        &self,
        map: &Map<String, Value>,
        specs: &[FieldSpec],
        exclude: Option<&str>,
    ) -> PageResult<FieldMap> {
        let pending = map
            .iter()
            .filter(|(name, value)| Some(name.as_str()) != exclude && !value.is_null())
            .filter_map(|(name, value)| {
                let spec = specs.iter().find(|spec| &spec.name == name)?;
                Some(async move {
                    let field = self.convert_field(value, spec).await?;
                    Ok::<_, PageError>(field.map(|field| (name.clone(), field)))
                })
            });

        Ok(try_join_all(pending).await?.into_iter().flatten().collect())
    }

    async fn convert_list(&self, value: &Value, spec: &FieldSpec) -> PageResult<UpdateOperationField> {
        let default_items = FieldSpec::item(FieldKind::String);
        let item_spec = spec.items.as_deref().unwrap_or(&default_items);

        // A lone value where a list was expected is a one-item list
        let elements: Vec<&Value> = match value {
            Value::Array(elements) => elements.iter().collect(),
            other => vec![other],
        };

        let converted = try_join_all(
            elements
                .into_iter()
                .filter(|element| !element.is_null())
                .map(|element| self.convert_field(element, item_spec)),
        )
        .await?;

        Ok(UpdateOperationField::list(converted.into_iter().flatten().collect()))
    }

    async fn convert_model(
        &self,
        value: &Value,
        spec: &FieldSpec,
    ) -> PageResult<Option<UpdateOperationField>> {
        let model_name = value
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .or_else(|| spec.models.first().map(String::as_str));

        let Some(model) = model_name.and_then(|name| self.schema.get(name)) else {
            tracing::warn!(
                field = %spec.name,
                model = ?model_name,
                "no model for type, dropping value"
            );
            return Ok(None);
        };

        if model.name == IMAGE_BLOCK_MODEL || spec.models.iter().any(|m| m == IMAGE_BLOCK_MODEL) {
            return Ok(Some(self.image_block(value).await));
        }

        let fields = match value.as_object() {
            Some(map) => self.convert_map(map, &model.fields, Some(TYPE_KEY)).await?,
            None => FieldMap::new(),
        };
        Ok(Some(UpdateOperationField::model(&model.name, fields)))
    }

    /// Image block built straight from a description: resolved url + alt text
    async fn image_block(&self, description: &Value) -> UpdateOperationField {
        let alt_text = description_text(description).unwrap_or_default().to_string();
        let url = self.images.resolve(description).await;

        let mut fields = FieldMap::new();
        fields.insert("url".to_string(), UpdateOperationField::image(url));
        fields.insert("altText".to_string(), UpdateOperationField::string(alt_text));
        UpdateOperationField::model(IMAGE_BLOCK_MODEL, fields)
    }
}

/// Referenced document id: the raw value, strings taken verbatim
fn reference_id(value: &Value) -> String {
    match value {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::converter;
    use super::*;
    use genpage_types::{Model, ModelSchema};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn item_schema() -> ModelSchema {
        ModelSchema::from_models([
            Model::new(
                "FeaturedItem",
                vec![
                    FieldSpec::new("title", FieldKind::String),
                    FieldSpec::new("text", FieldKind::Markdown),
                    FieldSpec::model("image", [IMAGE_BLOCK_MODEL]),
                ],
            ),
            Model::new(
                IMAGE_BLOCK_MODEL,
                vec![
                    FieldSpec::new("url", FieldKind::Image),
                    FieldSpec::new("altText", FieldKind::String),
                ],
            ),
            Model::new("Button", vec![FieldSpec::new("label", FieldKind::String)]),
        ])
    }

    const SCALAR_KINDS: [&str; 14] = [
        "string", "slug", "text", "html", "url", "boolean", "number", "date", "datetime",
        "enum", "json", "style", "color", "markdown",
    ];

    proptest! {
        #[test]
        fn scalars_pass_through_unchanged(
            kind_index in 0..SCALAR_KINDS.len(),
            text in ".{0,16}",
            number in any::<i64>(),
            flag in any::<bool>(),
            pick in 0..3usize,
        ) {
            let value = match pick {
                0 => json!(text),
                1 => json!(number),
                _ => json!(flag),
            };
            let kind = FieldKind::from(SCALAR_KINDS[kind_index]);
            let spec = FieldSpec::new("f", kind.clone());
            let converter = converter(ModelSchema::new());

            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let field = rt.block_on(converter.convert_field(&value, &spec)).unwrap().unwrap();
            prop_assert_eq!(field.kind(), kind.clone());
            prop_assert_eq!(field, UpdateOperationField::scalar(kind, value));
        }
    }

    #[tokio::test]
    async fn test_list_defaults_to_string_items() {
        let converter = converter(ModelSchema::new());
        let spec = FieldSpec::new("tags", FieldKind::List);
        let field = converter
            .convert_field(&json!(["a", "b"]), &spec)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            field,
            UpdateOperationField::list(vec![
                UpdateOperationField::string("a"),
                UpdateOperationField::string("b"),
            ])
        );
    }

    #[tokio::test]
    async fn test_list_skips_dropped_items_in_order() {
        let converter = converter(item_schema());
        let spec = FieldSpec::list("items", FieldSpec::model("", ["FeaturedItem"]));
        let value = json!([
            {"title": "first"},
            {"type": "Unknown", "title": "dropped"},
            null,
            {"type": "Button", "label": "third"},
            {"title": "fourth"}
        ]);

        let field = converter.convert_field(&value, &spec).await.unwrap().unwrap();
        let items = field.items().unwrap();
        assert_eq!(items.len(), 3);
        let names: Vec<_> = items.iter().map(|i| i.model_name().unwrap()).collect();
        assert_eq!(names, vec!["FeaturedItem", "Button", "FeaturedItem"]);
        assert_eq!(
            items[2].fields().unwrap().get("title"),
            Some(&UpdateOperationField::string("fourth"))
        );
    }

    #[tokio::test]
    async fn test_single_value_list() {
        let converter = converter(ModelSchema::new());
        let spec = FieldSpec::list("tags", FieldSpec::item(FieldKind::String));
        let field = converter.convert_field(&json!("solo"), &spec).await.unwrap().unwrap();
        assert_eq!(
            field,
            UpdateOperationField::list(vec![UpdateOperationField::string("solo")])
        );
    }

    #[tokio::test]
    async fn test_object_omits_unknown_and_null_keys() {
        let converter = converter(ModelSchema::new());
        let spec = FieldSpec::object(
            "title",
            vec![
                FieldSpec::new("text", FieldKind::String),
                FieldSpec::new("color", FieldKind::Color),
            ],
        );
        let value = json!({"text": "Hello", "color": null, "font": "serif"});

        let field = converter.convert_field(&value, &spec).await.unwrap().unwrap();
        let mut expected = FieldMap::new();
        expected.insert("text".into(), UpdateOperationField::string("Hello"));
        assert_eq!(field, UpdateOperationField::Object { fields: expected });
    }

    #[tokio::test]
    async fn test_model_uses_discriminator_and_excludes_it() {
        let mut schema = item_schema();
        schema.insert(Model::new(
            "Tagged",
            vec![
                FieldSpec::new("type", FieldKind::String),
                FieldSpec::new("label", FieldKind::String),
            ],
        ));
        let converter = converter(schema);
        let spec = FieldSpec::model("cta", ["Button"]);

        let field = converter
            .convert_field(&json!({"type": "Tagged", "label": "Go"}), &spec)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(field.model_name(), Some("Tagged"));
        let fields = field.fields().unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("label"));
    }

    #[tokio::test]
    async fn test_model_defaults_to_first_allowed_model() {
        let converter = converter(item_schema());
        let spec = FieldSpec::model("cta", ["Button", "FeaturedItem"]);
        let field = converter
            .convert_field(&json!({"label": "Buy"}), &spec)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(field.model_name(), Some("Button"));
    }

    #[tokio::test]
    async fn test_unresolved_model_is_dropped() {
        let converter = converter(item_schema());
        let spec = FieldSpec::model("cta", ["Missing"]);
        let field = converter.convert_field(&json!({"label": "x"}), &spec).await.unwrap();
        assert_eq!(field, None);
    }

    #[tokio::test]
    async fn test_image_block_from_description() {
        let converter = converter(item_schema());
        let spec = FieldSpec::model("image", [IMAGE_BLOCK_MODEL]);

        let field = converter
            .convert_field(&json!("orange-flowers.jpg"), &spec)
            .await
            .unwrap()
            .unwrap();

        let mut expected = FieldMap::new();
        expected.insert(
            "url".into(),
            UpdateOperationField::image(Some("https://photos.test/orange+flowers".into())),
        );
        expected.insert(
            "altText".into(),
            UpdateOperationField::string("orange-flowers.jpg"),
        );
        assert_eq!(field, UpdateOperationField::model(IMAGE_BLOCK_MODEL, expected));
    }

    #[tokio::test]
    async fn test_image_block_from_object_uses_alt_text() {
        let converter = converter(item_schema());
        let spec = FieldSpec::model("image", ["FeaturedItem", IMAGE_BLOCK_MODEL]);
        let field = converter
            .convert_field(&json!({"type": IMAGE_BLOCK_MODEL, "altText": "a harbour"}), &spec)
            .await
            .unwrap()
            .unwrap();
        let fields = field.fields().unwrap();
        assert_eq!(fields.get("altText"), Some(&UpdateOperationField::string("a harbour")));
        assert_eq!(
            fields.get("url"),
            Some(&UpdateOperationField::image(Some("https://photos.test/a+harbour".into())))
        );
    }

    #[tokio::test]
    async fn test_reference_and_image_kinds() {
        let converter = converter(ModelSchema::new());

        let reference = converter
            .convert_field(
                &json!("content/data/team/Drake-Garza.json"),
                &FieldSpec::new("person", FieldKind::Reference),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            reference,
            UpdateOperationField::document_ref("content/data/team/Drake-Garza.json")
        );

        let image = converter
            .convert_field(&json!("city skyline"), &FieldSpec::new("hero", FieldKind::Image))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            image,
            UpdateOperationField::image(Some("https://photos.test/city+skyline".into()))
        );
    }

    #[tokio::test]
    async fn test_unsupported_kind_is_fatal() {
        let converter = converter(ModelSchema::new());
        let spec = FieldSpec::list("files", FieldSpec::item("file"));
        let err = converter
            .convert_field(&json!(["a.pdf"]), &spec)
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::UnsupportedFieldKind { ref kind, .. } if kind == "file"));
    }
}
