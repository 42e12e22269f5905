//! Content sources
//!
//! A content source is the hosting CMS's persistence backend for one
//! project. [`GenerativeContentSource`] wraps another source and fills newly
//! created pages with a generated section layout; [`FileContentSource`] keeps
//! documents as JSON files.

mod file;
mod generative;

use async_trait::async_trait;
use genpage_types::{CreateDocumentRequest, Document, Model, UpdateOperation};

use crate::error::PageResult;

pub use file::FileContentSource;
pub use generative::{GenerativeContentSource, SECTIONS_FIELD};

/// Persistence backend for one content project
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short backend identifier, e.g. `files`
    fn content_source_type(&self) -> &str;

    fn project_id(&self) -> &str;

    async fn init(&self) -> PageResult<()>;

    async fn get_models(&self) -> PageResult<Vec<Model>>;

    async fn get_documents(&self) -> PageResult<Vec<Document>>;

    async fn create_document(&self, request: CreateDocumentRequest) -> PageResult<Document>;

    async fn update_document(
        &self,
        document_id: &str,
        operations: Vec<UpdateOperation>,
    ) -> PageResult<Document>;

    async fn delete_document(&self, document_id: &str) -> PageResult<()>;
}
