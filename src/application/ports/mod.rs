//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod catalog;
mod repositories;
mod session_manager;
mod text_source;

pub use catalog::{CatalogError, GutenbergCatalogPort, OpenLibraryPort, SubjectWork};
pub use repositories::{
    BookTextRepositoryPort, BookmarkRepositoryPort, LibraryRepositoryPort, RepositoryError,
    UserRepositoryPort,
};
pub use session_manager::{ReaderSession, ReaderSessionManagerPort, SessionError};
pub use text_source::{TextSourceError, TextSourcePort};
