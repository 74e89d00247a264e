//! Remote Text Source - 从公开镜像抓取全文
//!
//! 顺序:
//! 1. Gutenberg `files/{id}/{id}-0.txt`，再 `cache/epub/{id}/pg{id}.txt`
//! 2. Open Library 作品的各版本 `ocaid`，依次尝试 Internet Archive 的三种文本地址
//!
//! 每个地址只请求一次；任何失败都继续尝试下一个。

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{OpenLibraryPort, TextSourceError, TextSourcePort};
use crate::domain::library::{format_archive_text, is_usable_text, Book};
use crate::infrastructure::adapters::http_fetcher::HttpFetcher;

/// Gutenberg 文本的最小长度
const MIN_GUTENBERG_CHARS: usize = 500;

/// Internet Archive OCR 文本的最小长度
const MIN_ARCHIVE_CHARS: usize = 1000;

/// 远程全文来源配置
#[derive(Debug, Clone)]
pub struct RemoteTextSourceConfig {
    pub gutenberg_url: String,
    pub archive_url: String,
    /// `view_archive.php` 所在的存储节点
    pub archive_view_url: String,
}

impl Default for RemoteTextSourceConfig {
    fn default() -> Self {
        Self {
            gutenberg_url: "https://www.gutenberg.org".to_string(),
            archive_url: "https://archive.org".to_string(),
            archive_view_url: "https://ia800500.us.archive.org".to_string(),
        }
    }
}

/// 远程全文来源
pub struct RemoteTextSource {
    fetcher: Arc<HttpFetcher>,
    open_library: Arc<dyn OpenLibraryPort>,
    gutenberg_url: String,
    archive_url: String,
    archive_view_url: String,
}

impl RemoteTextSource {
    pub fn new(
        fetcher: Arc<HttpFetcher>,
        open_library: Arc<dyn OpenLibraryPort>,
        config: RemoteTextSourceConfig,
    ) -> Self {
        Self {
            fetcher,
            open_library,
            gutenberg_url: config.gutenberg_url.trim_end_matches('/').to_string(),
            archive_url: config.archive_url.trim_end_matches('/').to_string(),
            archive_view_url: config.archive_view_url.trim_end_matches('/').to_string(),
        }
    }

    fn gutenberg_urls(&self, id: u64) -> [String; 2] {
        [
            format!("{}/files/{id}/{id}-0.txt", self.gutenberg_url),
            format!("{}/cache/epub/{id}/pg{id}.txt", self.gutenberg_url),
        ]
    }

    fn archive_urls(&self, ocaid: &str) -> [String; 3] {
        [
            format!(
                "{}/view_archive.php?archive=/0/items/{ocaid}/{ocaid}_djvu.txt",
                self.archive_view_url
            ),
            format!("{}/download/{ocaid}/{ocaid}_djvu.txt", self.archive_url),
            format!("{}/download/{ocaid}/{ocaid}.txt", self.archive_url),
        ]
    }

    /// 依次尝试，返回第一个通过校验的文本
    async fn first_usable(&self, urls: &[String], min_chars: usize) -> Option<String> {
        for url in urls {
            match self.fetcher.get_text(url).await {
                Ok(text) if is_usable_text(&text, min_chars) => return Some(text),
                Ok(_) => {
                    tracing::debug!(url = %url, "Rejected text: too short or HTML");
                }
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "Text request failed");
                }
            }
        }
        None
    }

    async fn from_gutenberg(&self, gutenberg_id: u64) -> Option<String> {
        self.first_usable(&self.gutenberg_urls(gutenberg_id), MIN_GUTENBERG_CHARS)
            .await
    }

    async fn from_archive(&self, book: &Book, work_key: &str) -> Option<String> {
        let ocaids = match self.open_library.archive_ids(work_key).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::debug!(book_id = %book.id, error = %e, "Editions lookup failed");
                return None;
            }
        };

        for ocaid in ocaids {
            if let Some(raw) = self.first_usable(&self.archive_urls(&ocaid), MIN_ARCHIVE_CHARS).await {
                tracing::info!(book_id = %book.id, ocaid = %ocaid, "Text found on Internet Archive");
                return Some(format_archive_text(book, &raw));
            }
        }
        None
    }
}

#[async_trait]
impl TextSourcePort for RemoteTextSource {
    async fn fetch_text(&self, book: &Book) -> Result<String, TextSourceError> {
        if let Some(gutenberg_id) = book.gutenberg_id {
            if let Some(text) = self.from_gutenberg(gutenberg_id).await {
                tracing::info!(
                    book_id = %book.id,
                    gutenberg_id = gutenberg_id,
                    chars = text.chars().count(),
                    "Text found on Gutenberg"
                );
                return Ok(text);
            }
        }

        // Gutendex 结果的 key 不是作品 key，没有版本信息
        if let Some(work_key) = book
            .open_library_key
            .as_deref()
            .filter(|k| k.starts_with("/works/"))
        {
            if let Some(text) = self.from_archive(book, work_key).await {
                return Ok(text);
            }
        }

        Err(TextSourceError::Unavailable(book.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::catalog::OfflineCatalog;
    use crate::infrastructure::adapters::http_fetcher::HttpFetcherConfig;

    fn source() -> RemoteTextSource {
        let fetcher = Arc::new(HttpFetcher::new(HttpFetcherConfig::default()).unwrap());
        RemoteTextSource::new(
            fetcher,
            Arc::new(OfflineCatalog::new()),
            RemoteTextSourceConfig::default(),
        )
    }

    #[test]
    fn test_gutenberg_urls() {
        assert_eq!(
            source().gutenberg_urls(1342),
            [
                "https://www.gutenberg.org/files/1342/1342-0.txt".to_string(),
                "https://www.gutenberg.org/cache/epub/1342/pg1342.txt".to_string(),
            ]
        );
    }

    #[test]
    fn test_archive_urls() {
        let urls = source().archive_urls("prideprejudice00aust");
        assert_eq!(
            urls[0],
            "https://ia800500.us.archive.org/view_archive.php?archive=/0/items/prideprejudice00aust/prideprejudice00aust_djvu.txt"
        );
        assert_eq!(
            urls[1],
            "https://archive.org/download/prideprejudice00aust/prideprejudice00aust_djvu.txt"
        );
        assert_eq!(
            urls[2],
            "https://archive.org/download/prideprejudice00aust/prideprejudice00aust.txt"
        );
    }

    #[test]
    fn test_archive_urls_follow_config() {
        let fetcher = Arc::new(HttpFetcher::new(HttpFetcherConfig::default()).unwrap());
        let source = RemoteTextSource::new(
            fetcher,
            Arc::new(OfflineCatalog::new()),
            RemoteTextSourceConfig {
                gutenberg_url: "http://mirror.local/".to_string(),
                archive_url: "http://archive.local".to_string(),
                archive_view_url: "http://node7.archive.local/".to_string(),
            },
        );

        let urls = source.archive_urls("abc");
        assert_eq!(
            urls[0],
            "http://node7.archive.local/view_archive.php?archive=/0/items/abc/abc_djvu.txt"
        );
        assert_eq!(urls[1], "http://archive.local/download/abc/abc_djvu.txt");
        assert_eq!(source.gutenberg_urls(5)[0], "http://mirror.local/files/5/5-0.txt");
    }

    #[tokio::test]
    async fn test_book_without_sources_is_unavailable() {
        let book = Book::local("Notes", "Me", crate::domain::library::Category::Fiction);
        assert!(matches!(
            source().fetch_text(&book).await,
            Err(TextSourceError::Unavailable(id)) if id == book.id
        ));
    }
}
