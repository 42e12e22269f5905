//! Photo search
//!
//! Image fields in generated layouts hold descriptions ("three orange
//! flowers"), not URLs. [`ImageResolver`] turns a description into the URL of
//! a matching stock photo using any [`PhotoSearch`] backend.

pub mod resolver;
pub mod unsplash;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use resolver::ImageResolver;
pub use unsplash::UnsplashClient;

/// A photo returned by a search backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Display URL
    pub url: String,
}

impl Photo {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Photo-search backend
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    /// Photos matching a free-text query, best match first
    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>>;

    /// Any one photo, or `None` if the backend has nothing to offer
    async fn random_photo(&self) -> Result<Option<Photo>>;
}
