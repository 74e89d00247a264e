//! Reader Command Handlers

use std::sync::Arc;

use crate::application::book_text::BookTextResolver;
use crate::application::commands::{
    CloseReader, GoToChapter, GoToPage, OpenBook, PageDirection, PressKey, ToggleBookmark,
    TurnPage,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookmarkRepositoryPort, LibraryRepositoryPort, ReaderSession, ReaderSessionManagerPort,
};
use crate::domain::reader::{BookDocument, Pager, ReaderAction};

// ============================================================================
// Response DTOs
// ============================================================================

/// 当前页视图
#[derive(Debug, Clone)]
pub struct PageView {
    pub session_id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub page: usize,
    pub page_count: usize,
    pub progress_percent: f64,
    pub content: String,
    pub bookmarked: bool,
}

impl PageView {
    pub fn from_session(session: &ReaderSession, bookmarked: bool) -> Self {
        let page = session.position.current();
        Self {
            session_id: session.id.clone(),
            book_id: session.book.id.clone(),
            title: session.book.title.clone(),
            author: session.book.author.clone(),
            page,
            page_count: session.position.page_count(),
            progress_percent: session.position.progress_percent(),
            content: session.document.page(page).to_string(),
            bookmarked,
        }
    }
}

/// 打开书籍响应
#[derive(Debug, Clone)]
pub struct OpenBookResponse {
    pub view: PageView,
    pub text_origin: &'static str,
    pub chapters: usize,
}

/// 构建带书签状态的页视图
pub(crate) async fn render_page(
    bookmark_repo: &dyn BookmarkRepositoryPort,
    session: &ReaderSession,
) -> Result<PageView, ApplicationError> {
    let bookmarks = bookmark_repo.find(&session.book.id).await?;
    Ok(PageView::from_session(
        session,
        bookmarks.contains(session.position.current()),
    ))
}

// ============================================================================
// OpenBook
// ============================================================================

/// OpenBook Handler - 获取正文、分页并创建会话
pub struct OpenBookHandler {
    library_repo: Arc<dyn LibraryRepositoryPort>,
    bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
    session_manager: Arc<dyn ReaderSessionManagerPort>,
    resolver: Arc<BookTextResolver>,
    pager: Pager,
}

impl OpenBookHandler {
    pub fn new(
        library_repo: Arc<dyn LibraryRepositoryPort>,
        bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
        session_manager: Arc<dyn ReaderSessionManagerPort>,
        resolver: Arc<BookTextResolver>,
        pager: Pager,
    ) -> Self {
        Self {
            library_repo,
            bookmark_repo,
            session_manager,
            resolver,
            pager,
        }
    }

    pub async fn handle(&self, command: OpenBook) -> Result<OpenBookResponse, ApplicationError> {
        let book = self
            .library_repo
            .find_by_id(&command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", command.book_id.as_str()))?;

        let (text, origin) = self.resolver.resolve(&book).await;
        let document = BookDocument::new(&text, &self.pager);
        let chapters = document.toc().len();

        let session = ReaderSession::new(book, document);
        let session_id = self.session_manager.create(session.clone())?;

        tracing::info!(
            session_id = %session_id,
            book_id = %session.book.id,
            pages = session.position.page_count(),
            chapters = chapters,
            origin = origin.as_str(),
            "Reader session opened"
        );

        let view = render_page(self.bookmark_repo.as_ref(), &session).await?;
        Ok(OpenBookResponse {
            view,
            text_origin: origin.as_str(),
            chapters,
        })
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// 页面导航 Handler（翻页、跳页、跳章节）
pub struct NavigateHandler {
    session_manager: Arc<dyn ReaderSessionManagerPort>,
    bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
}

impl NavigateHandler {
    pub fn new(
        session_manager: Arc<dyn ReaderSessionManagerPort>,
        bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
    ) -> Self {
        Self {
            session_manager,
            bookmark_repo,
        }
    }

    pub async fn turn(&self, command: TurnPage) -> Result<PageView, ApplicationError> {
        self.update(&command.session_id, |session| {
            match command.direction {
                PageDirection::Next => session.position.next(),
                PageDirection::Prev => session.position.prev(),
            };
            Ok(())
        })
        .await
    }

    pub async fn go_to(&self, command: GoToPage) -> Result<PageView, ApplicationError> {
        self.update(&command.session_id, |session| {
            session.position.go_to(command.page);
            Ok(())
        })
        .await
    }

    pub async fn go_to_chapter(&self, command: GoToChapter) -> Result<PageView, ApplicationError> {
        self.update(&command.session_id, |session| {
            let entry = session.document.toc().get(command.chapter).ok_or_else(|| {
                ApplicationError::validation(format!(
                    "Invalid chapter: {} (total chapters: {})",
                    command.chapter,
                    session.document.toc().len()
                ))
            })?;
            let page = entry.page as i64;
            session.position.go_to(page);
            Ok(())
        })
        .await
    }

    async fn update<F>(&self, session_id: &str, apply: F) -> Result<PageView, ApplicationError>
    where
        F: FnOnce(&mut ReaderSession) -> Result<(), ApplicationError>,
    {
        let mut session = self.session_manager.get(session_id)?;
        apply(&mut session)?;
        self.session_manager
            .update_position(session_id, session.position)?;

        tracing::debug!(
            session_id = %session_id,
            page = session.position.current(),
            "Reader position updated"
        );

        render_page(self.bookmark_repo.as_ref(), &session).await
    }
}

// ============================================================================
// ToggleBookmark
// ============================================================================

#[derive(Debug, Clone)]
pub struct ToggleBookmarkResponse {
    pub book_id: String,
    pub page: usize,
    pub bookmarked: bool,
    pub pages: Vec<usize>,
}

/// ToggleBookmark Handler
pub struct ToggleBookmarkHandler {
    session_manager: Arc<dyn ReaderSessionManagerPort>,
    bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
}

impl ToggleBookmarkHandler {
    pub fn new(
        session_manager: Arc<dyn ReaderSessionManagerPort>,
        bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
    ) -> Self {
        Self {
            session_manager,
            bookmark_repo,
        }
    }

    pub async fn handle(&self, command: ToggleBookmark) -> Result<ToggleBookmarkResponse, ApplicationError> {
        let session = self.session_manager.get(&command.session_id)?;
        self.session_manager.touch(&session.id);
        let book_id = session.book.id.clone();
        let page = session.position.current();

        let (bookmarked, bookmarks) = self.bookmark_repo.toggle(&book_id, page).await?;

        tracing::info!(
            session_id = %command.session_id,
            book_id = %book_id,
            page = page,
            bookmarked = bookmarked,
            "Bookmark toggled"
        );

        Ok(ToggleBookmarkResponse {
            book_id,
            page,
            bookmarked,
            pages: bookmarks.pages().to_vec(),
        })
    }
}

// ============================================================================
// CloseReader
// ============================================================================

/// CloseReader Handler
pub struct CloseReaderHandler {
    session_manager: Arc<dyn ReaderSessionManagerPort>,
}

impl CloseReaderHandler {
    pub fn new(session_manager: Arc<dyn ReaderSessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub fn handle(&self, command: CloseReader) -> Result<(), ApplicationError> {
        self.session_manager.close(&command.session_id)?;
        Ok(())
    }
}

// ============================================================================
// PressKey
// ============================================================================

/// 快捷键处理结果
#[derive(Debug, Clone)]
pub enum KeyOutcome {
    /// 未绑定的按键
    Ignored,
    /// 翻页后的页面
    Page(PageView),
    /// 书签已切换
    Bookmark(ToggleBookmarkResponse),
    /// 阅读器已关闭
    Closed,
}

impl KeyOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            KeyOutcome::Ignored => "ignored",
            KeyOutcome::Page(_) => "page",
            KeyOutcome::Bookmark(_) => "bookmark",
            KeyOutcome::Closed => "closed",
        }
    }
}

/// PressKey Handler - 将按键分发到对应的命令
pub struct PressKeyHandler {
    navigate: NavigateHandler,
    toggle_bookmark: ToggleBookmarkHandler,
    close: CloseReaderHandler,
}

impl PressKeyHandler {
    pub fn new(
        session_manager: Arc<dyn ReaderSessionManagerPort>,
        bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
    ) -> Self {
        Self {
            navigate: NavigateHandler::new(session_manager.clone(), bookmark_repo.clone()),
            toggle_bookmark: ToggleBookmarkHandler::new(session_manager.clone(), bookmark_repo),
            close: CloseReaderHandler::new(session_manager),
        }
    }

    pub async fn handle(&self, command: PressKey) -> Result<KeyOutcome, ApplicationError> {
        let session_id = command.session_id;
        let Some(action) = command.key.action() else {
            return Ok(KeyOutcome::Ignored);
        };

        match action {
            ReaderAction::NextPage | ReaderAction::PrevPage => {
                let direction = if action == ReaderAction::NextPage {
                    PageDirection::Next
                } else {
                    PageDirection::Prev
                };
                let view = self.navigate.turn(TurnPage { session_id, direction }).await?;
                Ok(KeyOutcome::Page(view))
            }
            ReaderAction::ToggleBookmark => {
                let result = self
                    .toggle_bookmark
                    .handle(ToggleBookmark { session_id })
                    .await?;
                Ok(KeyOutcome::Bookmark(result))
            }
            ReaderAction::Close => {
                self.close.handle(CloseReader { session_id })?;
                Ok(KeyOutcome::Closed)
            }
        }
    }
}
