//! Open Library Client
//!
//! - 检索: `GET {base}/search.json?q=...&limit=N`
//! - 主题: `GET {base}/subjects/{subject}.json?limit=N`
//! - 版本: `GET {base}/works/{id}/editions.json?limit=10`

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::ports::{CatalogError, OpenLibraryPort, SubjectWork};
use crate::domain::library::CatalogHit;
use crate::infrastructure::adapters::http_fetcher::{encode_component, HttpFetcher};

/// 每部作品检查的版本数
const EDITIONS_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    key: Option<String>,
    title: Option<String>,
    author_name: Option<Vec<String>>,
    cover_i: Option<u64>,
    first_publish_year: Option<i64>,
    subject: Option<Vec<String>>,
}

impl SearchDoc {
    /// 没有 key 或标题的条目丢弃
    fn into_hit(self) -> Option<CatalogHit> {
        let key = self.key?;
        let title = self.title?;
        Some(CatalogHit {
            key,
            title,
            author: first_or(self.author_name, "Unknown Author"),
            cover_id: self.cover_i,
            cover_url: None,
            first_publish_year: self.first_publish_year.map(|y| y.to_string()),
            subject: first_or(self.subject, "fiction"),
            gutenberg_id: None,
            has_full_text: false,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SubjectResponse {
    #[serde(default)]
    works: Vec<SubjectWorkDoc>,
}

#[derive(Debug, Deserialize)]
struct SubjectWorkDoc {
    key: Option<String>,
    title: Option<String>,
    #[serde(default)]
    authors: Vec<AuthorDoc>,
    cover_id: Option<u64>,
    cover_edition_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthorDoc {
    name: Option<String>,
}

impl From<SubjectWorkDoc> for SubjectWork {
    fn from(doc: SubjectWorkDoc) -> Self {
        SubjectWork {
            key: doc.key,
            title: doc.title,
            author: doc.authors.into_iter().next().and_then(|a| a.name),
            cover_id: doc.cover_id,
            cover_edition_key: doc.cover_edition_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EditionsResponse {
    #[serde(default)]
    entries: Vec<EditionDoc>,
}

#[derive(Debug, Deserialize)]
struct EditionDoc {
    ocaid: Option<String>,
}

fn first_or(values: Option<Vec<String>>, default: &str) -> String {
    values
        .and_then(|v| v.into_iter().next())
        .unwrap_or_else(|| default.to_string())
}

/// Open Library 客户端
pub struct OpenLibraryClient {
    fetcher: Arc<HttpFetcher>,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new(fetcher: Arc<HttpFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/search.json?q={}&limit={}",
            self.base_url,
            encode_component(query),
            limit
        )
    }

    fn subject_url(&self, subject: &str, limit: usize) -> String {
        format!(
            "{}/subjects/{}.json?limit={}",
            self.base_url,
            encode_component(subject),
            limit
        )
    }

    fn editions_url(&self, work_id: &str) -> String {
        format!(
            "{}/works/{}/editions.json?limit={}",
            self.base_url,
            work_id.trim_start_matches("/works/"),
            EDITIONS_LIMIT
        )
    }
}

#[async_trait]
impl OpenLibraryPort for OpenLibraryClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogHit>, CatalogError> {
        let response: SearchResponse = self.fetcher.get_json(&self.search_url(query, limit)).await?;
        let hits: Vec<CatalogHit> = response
            .docs
            .into_iter()
            .filter_map(SearchDoc::into_hit)
            .collect();

        tracing::debug!(query = %query, results = hits.len(), "Open Library search completed");
        Ok(hits)
    }

    async fn subject_works(
        &self,
        subject: &str,
        limit: usize,
    ) -> Result<Vec<SubjectWork>, CatalogError> {
        let response: SubjectResponse =
            self.fetcher.get_json(&self.subject_url(subject, limit)).await?;

        tracing::debug!(subject = %subject, works = response.works.len(), "Subject fetched");
        Ok(response.works.into_iter().map(SubjectWork::from).collect())
    }

    async fn archive_ids(&self, work_id: &str) -> Result<Vec<String>, CatalogError> {
        let response: EditionsResponse = self.fetcher.get_json(&self.editions_url(work_id)).await?;
        Ok(response
            .entries
            .into_iter()
            .filter_map(|e| e.ocaid)
            .filter(|id| !id.is_empty())
            .collect())
    }
}
