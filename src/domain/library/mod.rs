//! Library Context - 书库上下文
//!
//! 职责:
//! - 书籍实体与分类
//! - 目录检索结果合并
//! - 列表筛选、内置书目
//! - 正文整理与占位正文

pub mod book;
mod category;
mod listing;
mod search;
mod seed;
mod text;

pub use book::Book;
pub use category::{Category, CategoryFilter};
pub use listing::{filter_window, next_displayed, LibraryWindow, DEFAULT_PAGE_STEP};
pub use search::{best_gutenberg_match, merge_hits, title_key, CatalogHit, GutenbergCandidate};
pub use seed::{
    curated_books, fallback_books, merge_rebuilt, CACHED_LIBRARY_THRESHOLD, LIBRARY_SUBJECTS,
};
pub use text::{
    export_file_name, export_text, fallback_content, format_archive_text, is_usable_text,
    looks_like_html,
};
