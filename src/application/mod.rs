//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（目录服务、全文来源、Repository、SessionManager）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - book_text: 正文来源解析
//! - error: 应用层错误定义

pub mod book_text;
pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use book_text::{BookTextResolver, TextOrigin};

pub use commands::{
    // Account commands
    Login,
    Register,
    // Library commands
    AddBookToLibrary,
    LoadLibrary,
    RemoveBook,
    UploadBook,
    // Reader commands
    CloseReader,
    GoToChapter,
    GoToPage,
    OpenBook,
    PageDirection,
    PressKey,
    ToggleBookmark,
    TurnPage,
    // Handlers
    handlers::{
        AccountProfile, AddBookResponse, AddBookToLibraryHandler, CloseReaderHandler, KeyOutcome,
        LibrarySource, LoadLibraryHandler, LoadLibraryResponse, LoginHandler, NavigateHandler,
        OpenBookHandler, OpenBookResponse, PageView, PressKeyHandler, RegisterHandler,
        RemoveBookHandler, ToggleBookmarkHandler, ToggleBookmarkResponse, UploadBookHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Catalog
    CatalogError,
    GutenbergCatalogPort,
    OpenLibraryPort,
    SubjectWork,
    // Text source
    TextSourceError,
    TextSourcePort,
    // Repositories
    BookTextRepositoryPort,
    BookmarkRepositoryPort,
    LibraryRepositoryPort,
    RepositoryError,
    UserRepositoryPort,
    // Session manager
    ReaderSession,
    ReaderSessionManagerPort,
    SessionError,
};

pub use queries::{
    ExportBook, GetPage, GetToc, ListBookmarks, ListBooks, SearchCatalog,
    handlers::{
        BookListResponse, ExportBookHandler, ExportedBook, GetPageHandler, GetTocHandler,
        ListBookmarksHandler, ListBooksHandler, SearchCatalogHandler, TocResponse,
    },
};
