//! Generative Content Source
//!
//! Document creation flow:
//!
//! ```text
//! title/description fields → LayoutSource → raw text → GeneratedLayout
//!     → SchemaConverter (components, concurrently) → `sections` list field
//!     → inner ContentSource::create_document
//! ```
//!
//! Every other operation is forwarded to the inner source unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use genpage_agentic::{PageLayoutGenerator, SitePrompt};
use genpage_types::{CreateDocumentRequest, Document, Model, UpdateOperation, UpdateOperationField};

use super::ContentSource;
use crate::config::GenpageConfig;
use crate::convert::SchemaConverter;
use crate::error::{PageError, PageResult};
use crate::layout::{GeneratedLayout, LayoutSource};
use crate::photos::{ImageResolver, PhotoSearch, UnsplashClient};

/// Page field receiving the converted layout
pub const SECTIONS_FIELD: &str = "sections";

pub struct GenerativeContentSource<S> {
    inner: S,
    layouts: Arc<dyn LayoutSource>,
    images: ImageResolver,
}

impl<S: ContentSource> GenerativeContentSource<S> {
    pub fn new(inner: S, layouts: Arc<dyn LayoutSource>, photos: Arc<dyn PhotoSearch>) -> Self {
        Self {
            inner,
            layouts,
            images: ImageResolver::new(photos),
        }
    }

    /// Wire the LLM backend from the environment and Unsplash from config
    pub fn from_config(inner: S, config: &GenpageConfig) -> PageResult<Self> {
        let site = SitePrompt::new(&config.site_name, &config.site_description);
        let generator = PageLayoutGenerator::from_env(&site).map_err(PageError::Generation)?;
        let photos = UnsplashClient::new(config.unsplash_access_key.clone())
            .with_page_size(config.photo_page_size);
        Ok(Self::new(inner, Arc::new(generator), Arc::new(photos)))
    }

    async fn generate_sections(
        &self,
        request: &CreateDocumentRequest,
    ) -> PageResult<Vec<UpdateOperationField>> {
        let title = request.fields.get("title").and_then(UpdateOperationField::as_string);
        let description = request
            .fields
            .get("description")
            .and_then(UpdateOperationField::as_string);

        tracing::info!(model = %request.model.name, title = ?title, "generating page layout");
        let raw = self
            .layouts
            .request_layout(title, description)
            .await
            .map_err(PageError::Generation)?;
        let layout = GeneratedLayout::parse(&raw)?;

        let converter = SchemaConverter::new(request.schema.clone(), self.images.clone());
        let sections = converter.convert_components(&layout.components).await?;
        tracing::info!(
            generated = layout.len(),
            kept = sections.len(),
            "page layout converted"
        );
        Ok(sections)
    }
}

#[async_trait]
impl<S: ContentSource> ContentSource for GenerativeContentSource<S> {
    fn content_source_type(&self) -> &str {
        self.inner.content_source_type()
    }

    fn project_id(&self) -> &str {
        self.inner.project_id()
    }

    async fn init(&self) -> PageResult<()> {
        self.inner.init().await
    }

    async fn get_models(&self) -> PageResult<Vec<Model>> {
        self.inner.get_models().await
    }

    async fn get_documents(&self) -> PageResult<Vec<Document>> {
        self.inner.get_documents().await
    }

    async fn create_document(&self, mut request: CreateDocumentRequest) -> PageResult<Document> {
        let sections = self.generate_sections(&request).await?;
        request
            .fields
            .insert(SECTIONS_FIELD.to_string(), UpdateOperationField::list(sections));
        self.inner.create_document(request).await
    }

    async fn update_document(
        &self,
        document_id: &str,
        operations: Vec<UpdateOperation>,
    ) -> PageResult<Document> {
        self.inner.update_document(document_id, operations).await
    }

    async fn delete_document(&self, document_id: &str) -> PageResult<()> {
        self.inner.delete_document(document_id).await
    }
}
