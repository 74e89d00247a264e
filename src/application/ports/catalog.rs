//! Catalog Ports - 外部书目服务抽象
//!
//! Open Library 与 Gutendex 两个公开目录，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::library::CatalogHit;

/// 目录服务错误
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 主题列表中的一部作品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectWork {
    /// `/works/OL...W`
    pub key: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover_id: Option<u64>,
    pub cover_edition_key: Option<String>,
}

/// Open Library Port
#[async_trait]
pub trait OpenLibraryPort: Send + Sync {
    /// 关键词检索（`search.json`）
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogHit>, CatalogError>;

    /// 按主题列出作品（`subjects/{subject}.json`）
    async fn subject_works(
        &self,
        subject: &str,
        limit: usize,
    ) -> Result<Vec<SubjectWork>, CatalogError>;

    /// 作品各版本在 Internet Archive 上的 ID（`ocaid`）
    async fn archive_ids(&self, work_id: &str) -> Result<Vec<String>, CatalogError>;
}

/// Gutenberg 目录 Port（Gutendex）
#[async_trait]
pub trait GutenbergCatalogPort: Send + Sync {
    /// 关键词检索，结果都带全文
    async fn search(&self, query: &str) -> Result<Vec<CatalogHit>, CatalogError>;
}
