//! Genpage - Generated Page Layouts for Headless CMS Content
//!
//! This crate is a content source that wraps another content source. When a
//! page document is created it asks a chat model for a page layout, converts
//! the model's loose JSON into typed update-operation fields against the
//! project's content model, resolves image descriptions to stock photo URLs,
//! and hands the populated document to the wrapped source.
//!
//! ## Flow
//!
//! ```text
//! create_document(title, description)
//!   → LayoutSource (LLM) → GeneratedLayout
//!   → SchemaConverter: normalize type → model lookup → field conversion
//!   → `sections` list field → inner ContentSource
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use genpage::{ContentSource, FileContentSource, GenerativeContentSource, GenpageConfig};
//! use genpage_types::{CreateDocumentRequest, UpdateOperationField};
//!
//! let config = GenpageConfig::from_env()?;
//! let files = FileContentSource::new(&config.content_dir, schema.clone());
//! let source = GenerativeContentSource::from_config(files, &config)?;
//!
//! let request = CreateDocumentRequest::new(page_model, schema)
//!     .with_field("title", UpdateOperationField::string("Pricing"));
//! let document = source.create_document(request).await?;
//! ```

// Core error handling
pub mod error;

pub mod config;

// Layout generation and conversion
pub mod convert;
pub mod layout;
pub mod photos;

// Content source wrapping and persistence
pub mod content_source;

// Public re-exports
pub use config::GenpageConfig;
pub use content_source::{ContentSource, FileContentSource, GenerativeContentSource, SECTIONS_FIELD};
pub use convert::{normalize_type_label, SchemaConverter, GENERIC_SECTION_MODEL};
pub use error::{PageError, PageResult};
pub use layout::{GeneratedLayout, LayoutSource};
pub use photos::{ImageResolver, Photo, PhotoSearch, UnsplashClient};
