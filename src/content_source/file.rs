//! File Content Source
//!
//! Stores each document as `<root>/<id>.json`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use genpage_types::{CreateDocumentRequest, Document, Model, ModelSchema, UpdateOperation};
use uuid::Uuid;

use super::ContentSource;
use crate::error::{PageError, PageResult};

pub struct FileContentSource {
    root: PathBuf,
    project_id: String,
    schema: Arc<ModelSchema>,
}

impl FileContentSource {
    pub fn new(root: impl Into<PathBuf>, schema: Arc<ModelSchema>) -> Self {
        let root = root.into();
        let project_id = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "content".to_string());
        Self {
            root,
            project_id,
            schema,
        }
    }

    fn document_path(&self, document_id: &str) -> PageResult<PathBuf> {
        // Ids become file names; refuse anything that could leave the root
        if document_id.is_empty()
            || document_id.contains(|c: char| c == '/' || c == '\\')
            || document_id.starts_with('.')
        {
            return Err(PageError::Persistence(anyhow::anyhow!(
                "invalid document id '{}'",
                document_id
            )));
        }
        Ok(self.root.join(format!("{}.json", document_id)))
    }

    async fn read_document(&self, path: &Path) -> PageResult<Document> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn load(&self, document_id: &str) -> PageResult<Document> {
        let path = self.document_path(document_id)?;
        match self.read_document(&path).await {
            Err(PageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Err(
                PageError::Persistence(anyhow::anyhow!("document '{}' not found", document_id)),
            ),
            other => other,
        }
    }

    async fn write(&self, document: &Document) -> PageResult<()> {
        let path = self.document_path(&document.id)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, serde_json::to_string_pretty(document)?).await?;
        tracing::debug!(id = %document.id, path = %path.display(), "document written");
        Ok(())
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    fn content_source_type(&self) -> &str {
        "files"
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn init(&self) -> PageResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    async fn get_models(&self) -> PageResult<Vec<Model>> {
        Ok(self.schema.models().into_iter().cloned().collect())
    }

    async fn get_documents(&self) -> PageResult<Vec<Document>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read_document(&path).await {
                Ok(document) => documents.push(document),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document"),
            }
        }
        documents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(documents)
    }

    async fn create_document(&self, request: CreateDocumentRequest) -> PageResult<Document> {
        let mut document = Document::new(Uuid::new_v4().to_string(), request.model.name, request.fields);
        document.locale = request.locale;
        self.write(&document).await?;
        tracing::info!(id = %document.id, model = %document.model_name, "document created");
        Ok(document)
    }

    async fn update_document(
        &self,
        document_id: &str,
        operations: Vec<UpdateOperation>,
    ) -> PageResult<Document> {
        let mut document = self.load(document_id).await?;
        for operation in operations {
            match operation {
                UpdateOperation::Set { field_name, field } => {
                    document.fields.insert(field_name, field);
                }
                UpdateOperation::Unset { field_name } => {
                    document.fields.remove(&field_name);
                }
            }
        }
        document.updated_at = Utc::now();
        self.write(&document).await?;
        Ok(document)
    }

    async fn delete_document(&self, document_id: &str) -> PageResult<()> {
        let path = self.document_path(document_id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PageError::Persistence(
                anyhow::anyhow!("document '{}' not found", document_id),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
