//! Generated layouts
//!
//! The text-generation service answers in free text that should contain one
//! JSON object. This module locates and parses it and reads the component
//! list from whichever shape the model chose.

use async_trait::async_trait;
use genpage_agentic::PageLayoutGenerator;
use serde_json::Value;

use crate::error::{PageError, PageResult};

/// Source of raw layout text for a page topic
#[async_trait]
pub trait LayoutSource: Send + Sync {
    /// Ask for a layout; the returned text is untrusted
    async fn request_layout(
        &self,
        title: Option<&str>,
        description: Option<&str>,
    ) -> anyhow::Result<String>;
}

#[async_trait]
impl LayoutSource for PageLayoutGenerator {
    async fn request_layout(
        &self,
        title: Option<&str>,
        description: Option<&str>,
    ) -> anyhow::Result<String> {
        self.generate(title, description).await
    }
}

/// Ordered list of generated components
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedLayout {
    pub components: Vec<Value>,
}

impl GeneratedLayout {
    /// Parse the layout out of raw response text
    ///
    /// Takes everything from the first `{` to the last `}`. Components are
    /// read from the first of `components` and `page.components` that holds
    /// an array; a payload with neither is an empty layout.
    pub fn parse(raw: &str) -> PageResult<Self> {
        let start = raw
            .find('{')
            .ok_or_else(|| PageError::parse("no JSON object in response"))?;
        let end = raw
            .rfind('}')
            .filter(|&end| end > start)
            .ok_or_else(|| PageError::parse("unterminated JSON object in response"))?;

        let payload: Value = serde_json::from_str(&raw[start..=end])
            .map_err(|e| PageError::parse(format!("invalid layout JSON: {}", e)))?;

        Ok(Self::from_value(&payload))
    }

    fn from_value(payload: &Value) -> Self {
        let components = payload
            .get("components")
            .and_then(Value::as_array)
            .or_else(|| {
                payload
                    .get("page")
                    .and_then(|page| page.get("components"))
                    .and_then(Value::as_array)
            })
            .cloned()
            .unwrap_or_default();
        Self { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_strips_surrounding_prose() {
        let raw = "Here is your page:\n```json\n{\"components\": [{\"type\": \"Section\"}]}\n```\nEnjoy!";
        let layout = GeneratedLayout::parse(raw).unwrap();
        assert_eq!(layout.components, vec![json!({"type": "Section"})]);
    }

    #[test]
    fn test_parse_nested_page_shape() {
        let layout =
            GeneratedLayout::parse(r#"{"page": {"components": [{"type": "Carousel"}, {"type": "Pricing"}]}}"#)
                .unwrap();
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_unusable_top_level_components_fall_back_to_page() {
        for raw in [
            r#"{"components": null, "page": {"components": [{"type": "Section"}]}}"#,
            r#"{"components": "none", "page": {"components": [{"type": "Section"}]}}"#,
        ] {
            let layout = GeneratedLayout::parse(raw).unwrap();
            assert_eq!(layout.components, vec![json!({"type": "Section"})], "{raw}");
        }
    }

    #[test]
    fn test_top_level_components_win() {
        let layout = GeneratedLayout::parse(
            r#"{"components": [{"type": "A"}], "page": {"components": [{"type": "B"}, {"type": "C"}]}}"#,
        )
        .unwrap();
        assert_eq!(layout.components, vec![json!({"type": "A"})]);
    }

    #[test]
    fn test_parse_unknown_shape_is_empty() {
        assert!(GeneratedLayout::parse(r#"{"sections": []}"#).unwrap().is_empty());
        assert!(GeneratedLayout::parse(r#"{"components": "none"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        for raw in ["yes", "", "} backwards {", "{\"components\": [}"] {
            let err = GeneratedLayout::parse(raw).unwrap_err();
            assert!(matches!(err, PageError::Parse { .. }), "{raw}: {err}");
        }
    }
}
