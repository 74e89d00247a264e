//! Reader Query Handlers

use std::sync::Arc;

use crate::application::commands::handlers::{render_page, PageView};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookmarkRepositoryPort, ReaderSessionManagerPort};
use crate::application::queries::{GetPage, GetToc, ListBookmarks};
use crate::domain::reader::ChapterEntry;

/// 目录响应
#[derive(Debug, Clone)]
pub struct TocResponse {
    pub entries: Vec<ChapterEntry>,
    pub current_page: usize,
}

/// GetPage Handler
pub struct GetPageHandler {
    session_manager: Arc<dyn ReaderSessionManagerPort>,
    bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
}

impl GetPageHandler {
    pub fn new(
        session_manager: Arc<dyn ReaderSessionManagerPort>,
        bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
    ) -> Self {
        Self {
            session_manager,
            bookmark_repo,
        }
    }

    pub async fn handle(&self, query: GetPage) -> Result<PageView, ApplicationError> {
        let session = self.session_manager.get(&query.session_id)?;
        self.session_manager.touch(&session.id);
        render_page(self.bookmark_repo.as_ref(), &session).await
    }
}

/// GetToc Handler
pub struct GetTocHandler {
    session_manager: Arc<dyn ReaderSessionManagerPort>,
}

impl GetTocHandler {
    pub fn new(session_manager: Arc<dyn ReaderSessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub fn handle(&self, query: GetToc) -> Result<TocResponse, ApplicationError> {
        let session = self.session_manager.get(&query.session_id)?;
        self.session_manager.touch(&session.id);
        Ok(TocResponse {
            entries: session.document.toc().to_vec(),
            current_page: session.position.current(),
        })
    }
}

/// ListBookmarks Handler
pub struct ListBookmarksHandler {
    bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
}

impl ListBookmarksHandler {
    pub fn new(bookmark_repo: Arc<dyn BookmarkRepositoryPort>) -> Self {
        Self { bookmark_repo }
    }

    pub async fn handle(&self, query: ListBookmarks) -> Result<Vec<usize>, ApplicationError> {
        let bookmarks = self.bookmark_repo.find(&query.book_id).await?;
        Ok(bookmarks.pages().to_vec())
    }
}
