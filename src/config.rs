//! Configuration
//!
//! Site identity and photo-service credentials, loaded from a YAML file or
//! from the environment. LLM backend credentials are read separately by
//! `genpage_agentic::create_llm_client` (`AGENT_BACKEND`, `*_API_KEY`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PageError, PageResult};

/// Default directory for file-backed page documents
pub const DEFAULT_CONTENT_DIR: &str = "content/pages";

/// Default number of photos requested per search
pub const DEFAULT_PHOTO_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenpageConfig {
    pub site_name: String,
    pub site_description: String,
    pub unsplash_access_key: String,
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default = "default_photo_page_size")]
    pub photo_page_size: u32,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONTENT_DIR)
}

fn default_photo_page_size() -> u32 {
    DEFAULT_PHOTO_PAGE_SIZE
}

impl GenpageConfig {
    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> PageResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
            .map_err(|e| PageError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(text: &str) -> PageResult<Self> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| PageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    ///
    /// Required: `GENPAGE_SITE_NAME`, `GENPAGE_SITE_DESCRIPTION`,
    /// `UNSPLASH_ACCESS_KEY`. Optional: `GENPAGE_CONTENT_DIR`,
    /// `GENPAGE_PHOTO_PAGE_SIZE`.
    pub fn from_env() -> PageResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PageResult<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| PageError::Config(format!("{} environment variable not set", key)))
        };

        let photo_page_size = match lookup("GENPAGE_PHOTO_PAGE_SIZE") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                PageError::Config(format!("GENPAGE_PHOTO_PAGE_SIZE is not a number: {}", raw))
            })?,
            None => DEFAULT_PHOTO_PAGE_SIZE,
        };

        let config = Self {
            site_name: required("GENPAGE_SITE_NAME")?,
            site_description: required("GENPAGE_SITE_DESCRIPTION")?,
            unsplash_access_key: required("UNSPLASH_ACCESS_KEY")?,
            content_dir: lookup("GENPAGE_CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_content_dir),
            photo_page_size,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> PageResult<()> {
        if self.photo_page_size == 0 {
            return Err(PageError::Config(
                "photo_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
