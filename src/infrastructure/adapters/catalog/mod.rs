//! Catalog Adapters - Open Library / Gutendex 客户端

mod gutendex;
mod offline;
mod open_library;

pub use gutendex::GutendexClient;
pub use offline::OfflineCatalog;
pub use open_library::OpenLibraryClient;
