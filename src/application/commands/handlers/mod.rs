//! Command Handlers

mod account_handlers;
mod library_handlers;
mod reader_handlers;

#[cfg(test)]
mod tests;

pub use account_handlers::{AccountProfile, LoginHandler, RegisterHandler};
pub use library_handlers::{
    AddBookResponse, AddBookToLibraryHandler, LibrarySource, LoadLibraryHandler,
    LoadLibraryResponse, RemoveBookHandler, UploadBookHandler,
};
pub(crate) use reader_handlers::render_page;
pub use reader_handlers::{
    CloseReaderHandler, KeyOutcome, NavigateHandler, OpenBookHandler, OpenBookResponse, PageView,
    PressKeyHandler, ToggleBookmarkHandler, ToggleBookmarkResponse,
};
