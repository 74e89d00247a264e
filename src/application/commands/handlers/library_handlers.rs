//! Library Command Handlers

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::commands::{AddBookToLibrary, LoadLibrary, RemoveBook, UploadBook};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookTextRepositoryPort, GutenbergCatalogPort, LibraryRepositoryPort, OpenLibraryPort,
    SubjectWork,
};
use crate::domain::library::book::{cover_url_by_id, cover_url_by_olid, PLACEHOLDER_COVER};
use crate::domain::library::{
    best_gutenberg_match, curated_books, fallback_books, Book, Category, GutenbergCandidate,
    CACHED_LIBRARY_THRESHOLD, LIBRARY_SUBJECTS,
};

// ============================================================================
// LoadLibrary
// ============================================================================

/// 书库来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibrarySource {
    /// 复用本地缓存
    Cache,
    /// 重新从 Open Library 抓取
    Remote,
    /// 保存失败，退回最小书目
    Fallback,
}

impl LibrarySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibrarySource::Cache => "cache",
            LibrarySource::Remote => "remote",
            LibrarySource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadLibraryResponse {
    pub total: usize,
    pub source: LibrarySource,
}

/// LoadLibrary Handler - 初始化书库
pub struct LoadLibraryHandler {
    library_repo: Arc<dyn LibraryRepositoryPort>,
    open_library: Arc<dyn OpenLibraryPort>,
    subject_limit: usize,
}

impl LoadLibraryHandler {
    pub fn new(
        library_repo: Arc<dyn LibraryRepositoryPort>,
        open_library: Arc<dyn OpenLibraryPort>,
        subject_limit: usize,
    ) -> Self {
        Self {
            library_repo,
            open_library,
            subject_limit,
        }
    }

    pub async fn handle(&self, command: LoadLibrary) -> Result<LoadLibraryResponse, ApplicationError> {
        let existing = self.library_repo.find_all().await?;
        if !command.force && existing.len() > CACHED_LIBRARY_THRESHOLD {
            tracing::info!(total = existing.len(), "Library loaded from cache");
            return Ok(LoadLibraryResponse {
                total: existing.len(),
                source: LibrarySource::Cache,
            });
        }

        // 本地书籍与重建期间新加入的书籍由仓储在写入时合并
        let snapshot: HashSet<String> = existing.into_iter().map(|b| b.id).collect();
        let mut books = curated_books();
        let mut seen: HashSet<String> = books.iter().map(|b| b.id.clone()).collect();

        let mut fetched = 0usize;
        for subject in LIBRARY_SUBJECTS {
            let works = match self.open_library.subject_works(subject, self.subject_limit).await {
                Ok(works) => works,
                Err(e) => {
                    tracing::warn!(subject = %subject, error = %e, "Failed to fetch subject, skipping");
                    continue;
                }
            };

            for work in works {
                let book = book_from_work(work, subject, fetched);
                if seen.insert(book.id.clone()) {
                    books.push(book);
                    fetched += 1;
                }
            }
        }

        match self.library_repo.rebuild(&snapshot, books).await {
            Ok(merged) => {
                tracing::info!(total = merged.len(), fetched = fetched, "Library loaded from Open Library");
                Ok(LoadLibraryResponse {
                    total: merged.len(),
                    source: LibrarySource::Remote,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save library, using fallback books");
                let fallback = fallback_books();
                self.library_repo.replace_all(&fallback).await?;
                Ok(LoadLibraryResponse {
                    total: fallback.len(),
                    source: LibrarySource::Fallback,
                })
            }
        }
    }
}

/// 主题作品转换为书库条目
fn book_from_work(work: SubjectWork, subject: &str, ordinal: usize) -> Book {
    let id = work
        .key
        .as_deref()
        .map(|k| k.replace("/works/", ""))
        .unwrap_or_else(|| format!("{}-{}", subject, ordinal));

    let cover = match (work.cover_id, work.cover_edition_key.as_deref()) {
        (Some(cover_id), _) => cover_url_by_id(cover_id),
        (None, Some(edition)) => cover_url_by_olid(edition),
        (None, None) => PLACEHOLDER_COVER.to_string(),
    };

    Book {
        id,
        title: work.title.unwrap_or_else(|| "Unknown Title".to_string()),
        author: work.author.unwrap_or_else(|| "Unknown Author".to_string()),
        category: Category::from_subject(subject),
        gutenberg_id: None,
        cover,
        open_library_key: work.key,
        has_full_text: false,
    }
}

// ============================================================================
// AddBookToLibrary
// ============================================================================

#[derive(Debug, Clone)]
pub struct AddBookResponse {
    pub book: Book,
    /// false 表示书库中已存在
    pub added: bool,
}

/// AddBookToLibrary Handler
pub struct AddBookToLibraryHandler {
    library_repo: Arc<dyn LibraryRepositoryPort>,
    gutenberg: Arc<dyn GutenbergCatalogPort>,
}

impl AddBookToLibraryHandler {
    pub fn new(
        library_repo: Arc<dyn LibraryRepositoryPort>,
        gutenberg: Arc<dyn GutenbergCatalogPort>,
    ) -> Self {
        Self {
            library_repo,
            gutenberg,
        }
    }

    pub async fn handle(&self, command: AddBookToLibrary) -> Result<AddBookResponse, ApplicationError> {
        let hit = command.hit;
        let book_id = hit.book_id();

        if let Some(book) = self.library_repo.find_by_id(&book_id).await? {
            return Ok(AddBookResponse { book, added: false });
        }

        // 没有全文时尝试在 Gutenberg 上找同名作品
        let extra_gutenberg_id = if hit.gutenberg_id.is_none() && !hit.has_full_text {
            self.find_gutenberg_id(&hit.title, &hit.author).await
        } else {
            None
        };

        let book = hit.into_book(extra_gutenberg_id);
        let added = self.library_repo.insert_front(&book).await?;

        tracing::info!(
            book_id = %book.id,
            title = %book.title,
            has_full_text = book.has_full_text,
            added = added,
            "Book added to library"
        );

        Ok(AddBookResponse { book, added })
    }

    async fn find_gutenberg_id(&self, title: &str, author: &str) -> Option<u64> {
        let query = format!("{} {}", title, author);
        match self.gutenberg.search(query.trim()).await {
            Ok(hits) => {
                let candidates: Vec<GutenbergCandidate> = hits
                    .into_iter()
                    .filter_map(|h| {
                        h.gutenberg_id.map(|id| GutenbergCandidate { id, title: h.title })
                    })
                    .collect();
                best_gutenberg_match(title, &candidates)
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Gutenberg lookup failed");
                None
            }
        }
    }
}

// ============================================================================
// RemoveBook
// ============================================================================

/// RemoveBook Handler
pub struct RemoveBookHandler {
    library_repo: Arc<dyn LibraryRepositoryPort>,
    text_repo: Arc<dyn BookTextRepositoryPort>,
}

impl RemoveBookHandler {
    pub fn new(
        library_repo: Arc<dyn LibraryRepositoryPort>,
        text_repo: Arc<dyn BookTextRepositoryPort>,
    ) -> Self {
        Self {
            library_repo,
            text_repo,
        }
    }

    pub async fn handle(&self, command: RemoveBook) -> Result<(), ApplicationError> {
        if !self.library_repo.remove(&command.book_id).await? {
            return Err(ApplicationError::not_found("Book", command.book_id));
        }

        self.text_repo.delete(&command.book_id).await?;

        tracing::info!(book_id = %command.book_id, "Book removed from library");
        Ok(())
    }
}

// ============================================================================
// UploadBook
// ============================================================================

/// UploadBook Handler - 保存上传的正文并加入书库
pub struct UploadBookHandler {
    library_repo: Arc<dyn LibraryRepositoryPort>,
    text_repo: Arc<dyn BookTextRepositoryPort>,
}

impl UploadBookHandler {
    pub fn new(
        library_repo: Arc<dyn LibraryRepositoryPort>,
        text_repo: Arc<dyn BookTextRepositoryPort>,
    ) -> Self {
        Self {
            library_repo,
            text_repo,
        }
    }

    pub async fn handle(&self, command: UploadBook) -> Result<Book, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Book text cannot be empty"));
        }
        let title = command.title.trim();
        if title.is_empty() {
            return Err(ApplicationError::validation("Title cannot be empty"));
        }

        let author = match command.author.trim() {
            "" => "Unknown Author",
            author => author,
        };
        let book = Book::local(title, author, command.category);

        self.text_repo.save(&book.id, &command.text).await?;
        self.library_repo.insert_front(&book).await?;

        tracing::info!(
            book_id = %book.id,
            title = %book.title,
            chars = command.text.chars().count(),
            "Book uploaded"
        );

        Ok(book)
    }
}
