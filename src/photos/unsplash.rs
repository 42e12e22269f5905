//! Unsplash Client
//!
//! [`PhotoSearch`] backed by the Unsplash REST API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{Photo, PhotoSearch};
use crate::config::DEFAULT_PHOTO_PAGE_SIZE;

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

/// Unsplash API client
#[derive(Clone)]
pub struct UnsplashClient {
    access_key: String,
    client: reqwest::Client,
    base_url: String,
    per_page: u32,
}

#[derive(Deserialize)]
struct Urls {
    regular: String,
}

#[derive(Deserialize)]
struct ApiPhoto {
    urls: Urls,
}

impl From<ApiPhoto> for Photo {
    fn from(photo: ApiPhoto) -> Self {
        Photo::new(photo.urls.regular)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ApiPhoto>,
}

impl UnsplashClient {
    pub fn new(access_key: String) -> Self {
        Self {
            access_key,
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PHOTO_PAGE_SIZE,
        }
    }

    /// Number of results requested per search
    pub fn with_page_size(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
    }
}

#[async_trait]
impl PhotoSearch for UnsplashClient {
    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>> {
        let per_page = self.per_page.to_string();
        let response = self
            .get("/search/photos")
            .query(&[("query", query), ("page", "1"), ("per_page", per_page.as_str())])
            .send()
            .await
            .context("Unsplash search request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Unsplash API error {}: {}", status, body));
        }

        let search: SearchResponse = response.json().await?;
        Ok(search.results.into_iter().map(Photo::from).collect())
    }

    async fn random_photo(&self) -> Result<Option<Photo>> {
        let response = self
            .get("/photos/random")
            .send()
            .await
            .context("Unsplash random photo request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Unsplash API error {}: {}", status, body));
        }

        let photo: ApiPhoto = response.json().await?;
        Ok(Some(photo.into()))
    }
}
