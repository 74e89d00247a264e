//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddBookToLibraryHandler, CloseReaderHandler, LoadLibraryHandler, LoginHandler,
    NavigateHandler, OpenBookHandler, PressKeyHandler, RegisterHandler, RemoveBookHandler,
    ToggleBookmarkHandler, UploadBookHandler,
    // Query handlers
    ExportBookHandler, GetPageHandler, GetTocHandler, ListBookmarksHandler, ListBooksHandler,
    SearchCatalogHandler,
    // Ports
    BookTextRepositoryPort, BookTextResolver, BookmarkRepositoryPort, GutenbergCatalogPort,
    LibraryRepositoryPort, OpenLibraryPort, ReaderSessionManagerPort, TextSourcePort,
    UserRepositoryPort,
};
use crate::domain::library::DEFAULT_PAGE_STEP;
use crate::domain::reader::{Pager, DEFAULT_CHARS_PER_PAGE};

/// 应用状态依赖的所有端口
#[derive(Clone)]
pub struct AppPorts {
    pub session_manager: Arc<dyn ReaderSessionManagerPort>,
    pub library_repo: Arc<dyn LibraryRepositoryPort>,
    pub user_repo: Arc<dyn UserRepositoryPort>,
    pub bookmark_repo: Arc<dyn BookmarkRepositoryPort>,
    pub text_repo: Arc<dyn BookTextRepositoryPort>,
    pub open_library: Arc<dyn OpenLibraryPort>,
    pub gutenberg: Arc<dyn GutenbergCatalogPort>,
    pub text_source: Arc<dyn TextSourcePort>,
}

/// 业务参数
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub chars_per_page: usize,
    pub page_step: usize,
    pub subject_limit: usize,
    pub search_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            chars_per_page: DEFAULT_CHARS_PER_PAGE,
            page_step: DEFAULT_PAGE_STEP,
            subject_limit: 100,
            search_limit: 30,
        }
    }
}

/// 应用状态
///
/// 阅读会话为内存实现，其余状态落在 Repository 中
pub struct AppState {
    // ========== Ports ==========
    pub session_manager: Arc<dyn ReaderSessionManagerPort>,
    pub library_repo: Arc<dyn LibraryRepositoryPort>,

    // ========== Command Handlers ==========
    pub register_handler: RegisterHandler,
    pub login_handler: LoginHandler,
    pub load_library_handler: LoadLibraryHandler,
    pub add_book_handler: AddBookToLibraryHandler,
    pub remove_book_handler: RemoveBookHandler,
    pub upload_book_handler: UploadBookHandler,
    pub open_book_handler: OpenBookHandler,
    pub navigate_handler: NavigateHandler,
    pub toggle_bookmark_handler: ToggleBookmarkHandler,
    pub press_key_handler: PressKeyHandler,
    pub close_reader_handler: CloseReaderHandler,

    // ========== Query Handlers ==========
    pub list_books_handler: ListBooksHandler,
    pub export_book_handler: ExportBookHandler,
    pub search_catalog_handler: SearchCatalogHandler,
    pub get_page_handler: GetPageHandler,
    pub get_toc_handler: GetTocHandler,
    pub list_bookmarks_handler: ListBookmarksHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(ports: AppPorts, settings: AppSettings) -> Self {
        let AppPorts {
            session_manager,
            library_repo,
            user_repo,
            bookmark_repo,
            text_repo,
            open_library,
            gutenberg,
            text_source,
        } = ports;

        let resolver = Arc::new(BookTextResolver::new(text_repo.clone(), text_source));
        let pager = Pager::new(settings.chars_per_page);

        Self {
            // Ports
            session_manager: session_manager.clone(),
            library_repo: library_repo.clone(),

            // Command handlers
            register_handler: RegisterHandler::new(user_repo.clone()),
            login_handler: LoginHandler::new(user_repo),
            load_library_handler: LoadLibraryHandler::new(
                library_repo.clone(),
                open_library.clone(),
                settings.subject_limit,
            ),
            add_book_handler: AddBookToLibraryHandler::new(library_repo.clone(), gutenberg.clone()),
            remove_book_handler: RemoveBookHandler::new(library_repo.clone(), text_repo.clone()),
            upload_book_handler: UploadBookHandler::new(library_repo.clone(), text_repo),
            open_book_handler: OpenBookHandler::new(
                library_repo.clone(),
                bookmark_repo.clone(),
                session_manager.clone(),
                resolver.clone(),
                pager,
            ),
            navigate_handler: NavigateHandler::new(session_manager.clone(), bookmark_repo.clone()),
            toggle_bookmark_handler: ToggleBookmarkHandler::new(
                session_manager.clone(),
                bookmark_repo.clone(),
            ),
            press_key_handler: PressKeyHandler::new(session_manager.clone(), bookmark_repo.clone()),
            close_reader_handler: CloseReaderHandler::new(session_manager.clone()),

            // Query handlers
            list_books_handler: ListBooksHandler::new(library_repo.clone(), settings.page_step),
            export_book_handler: ExportBookHandler::new(library_repo, resolver),
            search_catalog_handler: SearchCatalogHandler::new(
                gutenberg,
                open_library,
                settings.search_limit,
            ),
            get_page_handler: GetPageHandler::new(session_manager.clone(), bookmark_repo.clone()),
            get_toc_handler: GetTocHandler::new(session_manager),
            list_bookmarks_handler: ListBookmarksHandler::new(bookmark_repo),
        }
    }
}
