//! 书籍正文解析
//!
//! 来源优先级：本地上传 -> 远程镜像 -> 占位正文。
//! 任何失败都只记录日志，调用方总能拿到一份正文。

use std::sync::Arc;

use crate::application::ports::{BookTextRepositoryPort, TextSourcePort};
use crate::domain::library::{fallback_content, Book};

/// 正文来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrigin {
    Local,
    Remote,
    Fallback,
}

impl TextOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextOrigin::Local => "local",
            TextOrigin::Remote => "remote",
            TextOrigin::Fallback => "fallback",
        }
    }
}

/// 正文解析器
pub struct BookTextResolver {
    local: Arc<dyn BookTextRepositoryPort>,
    remote: Arc<dyn TextSourcePort>,
}

impl BookTextResolver {
    pub fn new(local: Arc<dyn BookTextRepositoryPort>, remote: Arc<dyn TextSourcePort>) -> Self {
        Self { local, remote }
    }

    pub async fn resolve(&self, book: &Book) -> (String, TextOrigin) {
        match self.local.find(&book.id).await {
            Ok(Some(text)) => return (text, TextOrigin::Local),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(book_id = %book.id, error = %e, "Failed to read local text");
            }
        }

        if book.gutenberg_id.is_some() || book.open_library_key.is_some() {
            match self.remote.fetch_text(book).await {
                Ok(text) => return (text, TextOrigin::Remote),
                Err(e) => {
                    tracing::info!(book_id = %book.id, error = %e, "Remote text unavailable, using fallback");
                }
            }
        }

        (fallback_content(book), TextOrigin::Fallback)
    }
}
