//! Library Query Handlers

use std::sync::Arc;

use crate::application::book_text::BookTextResolver;
use crate::application::error::ApplicationError;
use crate::application::ports::LibraryRepositoryPort;
use crate::application::queries::{ExportBook, ListBooks};
use crate::domain::library::{
    export_file_name, export_text, filter_window, next_displayed, CategoryFilter, LibraryWindow,
};

// ============================================================================
// Response DTOs
// ============================================================================

/// 书库列表响应
#[derive(Debug, Clone)]
pub struct BookListResponse {
    pub window: LibraryWindow,
    /// 再次 "加载更多" 时应传入的 displayed
    pub next_displayed: usize,
}

/// 导出文件
#[derive(Debug, Clone)]
pub struct ExportedBook {
    pub file_name: String,
    pub content: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListBooks Handler
pub struct ListBooksHandler {
    library_repo: Arc<dyn LibraryRepositoryPort>,
    page_step: usize,
}

impl ListBooksHandler {
    pub fn new(library_repo: Arc<dyn LibraryRepositoryPort>, page_step: usize) -> Self {
        Self {
            library_repo,
            page_step: page_step.max(1),
        }
    }

    pub async fn handle(&self, query: ListBooks) -> Result<BookListResponse, ApplicationError> {
        let category = CategoryFilter::parse(&query.category).ok_or_else(|| {
            ApplicationError::validation(format!("Unknown category: {}", query.category))
        })?;
        let displayed = query.displayed.unwrap_or(self.page_step);

        let books = self.library_repo.find_all().await?;
        let window = filter_window(&books, category, &query.search, displayed);
        let next = next_displayed(window.books.len(), self.page_step, window.total);

        Ok(BookListResponse {
            window,
            next_displayed: next,
        })
    }
}

/// ExportBook Handler - 生成可下载的纯文本
pub struct ExportBookHandler {
    library_repo: Arc<dyn LibraryRepositoryPort>,
    resolver: Arc<BookTextResolver>,
}

impl ExportBookHandler {
    pub fn new(library_repo: Arc<dyn LibraryRepositoryPort>, resolver: Arc<BookTextResolver>) -> Self {
        Self {
            library_repo,
            resolver,
        }
    }

    pub async fn handle(&self, query: ExportBook) -> Result<ExportedBook, ApplicationError> {
        let book = self
            .library_repo
            .find_by_id(&query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id.as_str()))?;

        let (body, origin) = self.resolver.resolve(&book).await;
        tracing::info!(book_id = %book.id, origin = origin.as_str(), "Book exported");

        Ok(ExportedBook {
            file_name: export_file_name(&book),
            content: export_text(&book, &body),
        })
    }
}
