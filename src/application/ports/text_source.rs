//! Text Source Port - 远程全文抓取抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::library::Book;

/// 全文抓取错误
#[derive(Debug, Error)]
pub enum TextSourceError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("No usable text for book: {0}")]
    Unavailable(String),
}

/// 远程全文来源
///
/// 每个候选 URL 只尝试一次，不重试。
#[async_trait]
pub trait TextSourcePort: Send + Sync {
    async fn fetch_text(&self, book: &Book) -> Result<String, TextSourceError>;
}
