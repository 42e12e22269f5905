//! Image resolution
//!
//! Description → search query → one photo URL, with a random-photo fallback.
//! Photo lookups are best effort: service failures are logged and end in the
//! fallback, never in an error.

use std::sync::Arc;

use rand::Rng;
use serde_json::Value;

use super::PhotoSearch;

#[derive(Clone)]
pub struct ImageResolver {
    photos: Arc<dyn PhotoSearch>,
}

impl ImageResolver {
    pub fn new(photos: Arc<dyn PhotoSearch>) -> Self {
        Self { photos }
    }

    /// Resolve an image description to a photo URL
    ///
    /// `description` is a string or an object carrying an `altText` string.
    /// An empty description skips the search and goes straight to a random
    /// photo. `None` only when the random fallback also comes back empty.
    pub async fn resolve(&self, description: &Value) -> Option<String> {
        let query = description_text(description)
            .map(normalize_query)
            .unwrap_or_default();

        if !query.is_empty() {
            match self.photos.search_photos(&query).await {
                Ok(results) if !results.is_empty() => {
                    let index = rand::thread_rng().gen_range(0..results.len());
                    let url = results[index].url.clone();
                    tracing::debug!(query = %query, url = %url, "photo found");
                    return Some(url);
                }
                Ok(_) => tracing::debug!(query = %query, "no photos for query"),
                Err(e) => tracing::warn!(query = %query, error = %e, "photo search failed"),
            }
        }

        match self.photos.random_photo().await {
            Ok(photo) => {
                let url = photo.map(|p| p.url);
                tracing::debug!(query = %query, url = ?url, "random photo fallback");
                url
            }
            Err(e) => {
                tracing::warn!(error = %e, "random photo request failed");
                None
            }
        }
    }
}

/// Text of an image description value
///
/// Strings are used as-is; objects contribute their `altText` string.
pub fn description_text(description: &Value) -> Option<&str> {
    match description {
        Value::String(text) => Some(text),
        Value::Object(map) => map.get("altText").and_then(Value::as_str),
        _ => None,
    }
}

/// Turn a description into a search query
///
/// Descriptions are sometimes file-like (`images/orange-flowers.jpg`):
/// separators become spaces, and only the last path segment before any
/// extension is kept.
pub fn normalize_query(description: &str) -> String {
    let spaced = description.replace(|c: char| c == '-' || c == '_', " ");
    let base = spaced
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    base.split('.').next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photos::Photo;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPhotos {
        results: Vec<Photo>,
        random: Option<Photo>,
        fail_search: bool,
        queries: Mutex<Vec<String>>,
        random_calls: Mutex<usize>,
    }

    #[async_trait]
    impl PhotoSearch for MockPhotos {
        async fn search_photos(&self, query: &str) -> Result<Vec<Photo>> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail_search {
                return Err(anyhow!("rate limited"));
            }
            Ok(self.results.clone())
        }

        async fn random_photo(&self) -> Result<Option<Photo>> {
            *self.random_calls.lock().unwrap() += 1;
            Ok(self.random.clone())
        }
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("three orange flowers"), "three orange flowers");
        assert_eq!(normalize_query("orange_flowers-in-vase"), "orange flowers in vase");
        assert_eq!(normalize_query("images/team-photo.jpg"), "team photo");
        assert_eq!(normalize_query("/images/hero/"), "hero");
        assert_eq!(normalize_query(".png"), "");
    }

    #[test]
    fn test_description_text() {
        assert_eq!(description_text(&json!("a cat")), Some("a cat"));
        assert_eq!(description_text(&json!({"altText": "a dog"})), Some("a dog"));
        assert_eq!(description_text(&json!({"url": "x"})), None);
        assert_eq!(description_text(&json!(42)), None);
    }

    #[tokio::test]
    async fn test_search_hit_picks_a_result() {
        let photos = Arc::new(MockPhotos {
            results: vec![Photo::new("https://a"), Photo::new("https://b")],
            ..Default::default()
        });
        let resolver = ImageResolver::new(photos.clone());

        let url = resolver.resolve(&json!("sunset-beach.jpg")).await.unwrap();
        assert!(url == "https://a" || url == "https://b");
        assert_eq!(*photos.queries.lock().unwrap(), vec!["sunset beach".to_string()]);
        assert_eq!(*photos.random_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_description_uses_random_only() {
        let photos = Arc::new(MockPhotos {
            results: vec![Photo::new("https://search")],
            random: Some(Photo::new("https://random")),
            ..Default::default()
        });
        let resolver = ImageResolver::new(photos.clone());

        for description in [json!(""), json!(null), json!({})] {
            let url = resolver.resolve(&description).await;
            assert_eq!(url.as_deref(), Some("https://random"));
        }
        assert!(photos.queries.lock().unwrap().is_empty());
        assert_eq!(*photos.random_calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_zero_results_falls_back_to_random() {
        let photos = Arc::new(MockPhotos {
            random: Some(Photo::new("https://random")),
            ..Default::default()
        });
        let resolver = ImageResolver::new(photos.clone());

        let url = resolver.resolve(&json!("unicorn office")).await;
        assert_eq!(url.as_deref(), Some("https://random"));
        assert_eq!(photos.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_failure_falls_back_to_random() {
        let photos = Arc::new(MockPhotos {
            fail_search: true,
            random: Some(Photo::new("https://random")),
            ..Default::default()
        });
        let resolver = ImageResolver::new(photos);
        let url = resolver.resolve(&json!({"altText": "harbour"})).await;
        assert_eq!(url.as_deref(), Some("https://random"));
    }

    #[tokio::test]
    async fn test_nothing_available() {
        let resolver = ImageResolver::new(Arc::new(MockPhotos::default()));
        assert_eq!(resolver.resolve(&json!("anything")).await, None);
    }
}
