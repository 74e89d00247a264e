//! Gutendex Client - Project Gutenberg 书目检索
//!
//! `GET {base}/books/?search=...`

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{CatalogError, GutenbergCatalogPort};
use crate::domain::library::CatalogHit;
use crate::infrastructure::adapters::http_fetcher::{encode_component, HttpFetcher};

#[derive(Debug, Deserialize)]
struct GutendexResponse {
    #[serde(default)]
    results: Vec<GutendexBook>,
}

#[derive(Debug, Deserialize)]
struct GutendexBook {
    id: u64,
    title: String,
    #[serde(default)]
    authors: Vec<GutendexPerson>,
    #[serde(default)]
    subjects: Vec<String>,
    #[serde(default)]
    formats: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct GutendexPerson {
    name: String,
    birth_year: Option<i32>,
}

impl From<GutendexBook> for CatalogHit {
    fn from(book: GutendexBook) -> Self {
        let first_author = book.authors.into_iter().next();
        CatalogHit {
            key: format!("gutenberg-{}", book.id),
            title: book.title,
            first_publish_year: first_author
                .as_ref()
                .and_then(|a| a.birth_year)
                .map(|y| format!("c. {}", y)),
            author: first_author
                .map(|a| a.name)
                .unwrap_or_else(|| "Unknown Author".to_string()),
            cover_id: None,
            cover_url: book.formats.get("image/jpeg").cloned(),
            subject: book
                .subjects
                .into_iter()
                .next()
                .unwrap_or_else(|| "fiction".to_string()),
            gutenberg_id: Some(book.id),
            has_full_text: true,
        }
    }
}

/// Gutendex 客户端
pub struct GutendexClient {
    fetcher: Arc<HttpFetcher>,
    base_url: String,
}

impl GutendexClient {
    pub fn new(fetcher: Arc<HttpFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}/books/?search={}", self.base_url, encode_component(query))
    }
}

#[async_trait]
impl GutenbergCatalogPort for GutendexClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogHit>, CatalogError> {
        let response: GutendexResponse = self.fetcher.get_json(&self.search_url(query)).await?;
        let hits: Vec<CatalogHit> = response.results.into_iter().map(CatalogHit::from).collect();

        tracing::debug!(query = %query, results = hits.len(), "Gutendex search completed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::http_fetcher::HttpFetcherConfig;

    #[test]
    fn test_search_url() {
        let fetcher = Arc::new(HttpFetcher::new(HttpFetcherConfig::default()).unwrap());
        let client = GutendexClient::new(fetcher, "https://gutendex.com");
        assert_eq!(
            client.search_url("Frankenstein Shelley"),
            "https://gutendex.com/books/?search=Frankenstein%20Shelley"
        );
    }

    #[test]
    fn test_results_to_hits() {
        let body = r#"{
            "count": 2,
            "results": [
                {"id": 84, "title": "Frankenstein; Or, The Modern Prometheus",
                 "authors": [{"name": "Shelley, Mary Wollstonecraft", "birth_year": 1797, "death_year": 1851}],
                 "subjects": ["Horror tales", "Science fiction"],
                 "formats": {"image/jpeg": "https://www.gutenberg.org/cache/epub/84/pg84.cover.medium.jpg"}},
                {"id": 42324, "title": "Anonymous Pamphlet", "authors": [], "subjects": [], "formats": {}}
            ]
        }"#;
        let response: GutendexResponse = serde_json::from_str(body).unwrap();
        let hits: Vec<CatalogHit> = response.results.into_iter().map(CatalogHit::from).collect();

        assert_eq!(hits[0].key, "gutenberg-84");
        assert_eq!(hits[0].book_id(), "g-84");
        assert_eq!(hits[0].author, "Shelley, Mary Wollstonecraft");
        assert_eq!(hits[0].first_publish_year.as_deref(), Some("c. 1797"));
        assert_eq!(hits[0].subject, "Horror tales");
        assert!(hits[0].cover_url.is_some());
        assert_eq!(hits[0].gutenberg_id, Some(84));
        assert!(hits[0].has_full_text);

        assert_eq!(hits[1].author, "Unknown Author");
        assert_eq!(hits[1].subject, "fiction");
        assert_eq!(hits[1].first_publish_year, None);
    }
}
