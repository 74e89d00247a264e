//! Offline Catalog - 不访问网络的目录与正文来源
//!
//! `catalog.offline = true` 时使用：检索只在内置书目中进行，
//! 主题列表为空，正文只来自预先注册的文本。

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{
    CatalogError, GutenbergCatalogPort, OpenLibraryPort, SubjectWork, TextSourceError,
    TextSourcePort,
};
use crate::domain::library::{curated_books, Book, CatalogHit};

/// 离线目录
pub struct OfflineCatalog {
    books: Vec<Book>,
    texts: DashMap<String, String>,
}

impl OfflineCatalog {
    pub fn new() -> Self {
        tracing::info!("OfflineCatalog initialized, outbound requests disabled");
        Self {
            books: curated_books(),
            texts: DashMap::new(),
        }
    }

    /// 为某本书注册正文
    pub fn with_text(self, book_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(book_id.into(), text.into());
        self
    }

    fn hits(&self, query: &str) -> Vec<CatalogHit> {
        self.books
            .iter()
            .filter(|b| b.matches_query(query.trim()))
            .filter_map(|b| {
                let gutenberg_id = b.gutenberg_id?;
                Some(CatalogHit {
                    key: format!("gutenberg-{}", gutenberg_id),
                    title: b.title.clone(),
                    author: b.author.clone(),
                    cover_id: None,
                    cover_url: Some(b.cover.clone()),
                    first_publish_year: None,
                    subject: b.category.as_str().to_string(),
                    gutenberg_id: Some(gutenberg_id),
                    has_full_text: true,
                })
            })
            .collect()
    }
}

impl Default for OfflineCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GutenbergCatalogPort for OfflineCatalog {
    async fn search(&self, query: &str) -> Result<Vec<CatalogHit>, CatalogError> {
        Ok(self.hits(query))
    }
}

#[async_trait]
impl OpenLibraryPort for OfflineCatalog {
    /// 内置书目都来自 Gutenberg，Open Library 一侧没有额外结果
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<CatalogHit>, CatalogError> {
        Ok(Vec::new())
    }

    async fn subject_works(
        &self,
        _subject: &str,
        _limit: usize,
    ) -> Result<Vec<SubjectWork>, CatalogError> {
        Ok(Vec::new())
    }

    async fn archive_ids(&self, _work_id: &str) -> Result<Vec<String>, CatalogError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl TextSourcePort for OfflineCatalog {
    async fn fetch_text(&self, book: &Book) -> Result<String, TextSourceError> {
        self.texts
            .get(&book.id)
            .map(|t| t.clone())
            .ok_or_else(|| TextSourceError::Unavailable(book.id.clone()))
    }
}
