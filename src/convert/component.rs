//! Component conversion
//!
//! A generated component is a JSON object tagged with a free-form `type`
//! label. Components whose label matches no model, raw or normalized, are
//! dropped from the layout.

use futures::future::try_join_all;
use genpage_types::UpdateOperationField;
use serde_json::Value;

use super::field::TYPE_KEY;
use super::normalize::normalize_type_label;
use super::SchemaConverter;
use crate::error::PageResult;

impl SchemaConverter {
    /// Convert one generated component into a `model` field
    pub async fn convert_component(&self, component: &Value) -> PageResult<Option<UpdateOperationField>> {
        let Some(map) = component.as_object() else {
            tracing::warn!("generated component is not an object, dropping it");
            return Ok(None);
        };
        let Some(label) = map.get(TYPE_KEY).and_then(Value::as_str) else {
            tracing::warn!("generated component has no type label, dropping it");
            return Ok(None);
        };

        let normalized = normalize_type_label(label);
        let Some(model) = self.schema.get(label).or_else(|| self.schema.get(&normalized)) else {
            tracing::warn!(label, normalized = %normalized, "no model for component, dropping it");
            return Ok(None);
        };
        tracing::debug!(label, model = %model.name, "component resolved");

        let fields = self.convert_map(map, &model.fields, None).await?;
        Ok(Some(UpdateOperationField::model(&model.name, fields)))
    }

    /// Convert a whole layout, keeping source order and dropping unresolved components
    pub async fn convert_components(&self, components: &[Value]) -> PageResult<Vec<UpdateOperationField>> {
        let converted =
            try_join_all(components.iter().map(|component| self.convert_component(component))).await?;
        Ok(converted.into_iter().flatten().collect())
    }
}
