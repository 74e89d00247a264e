//! Reader Context - 阅读上下文
//!
//! 职责:
//! - 文本分页与目录生成（纯函数）
//! - 阅读位置、书签
//! - 快捷键映射

mod bookmarks;
mod document;
mod keys;
mod pager;
mod position;
mod toc;

pub use bookmarks::BookmarkSet;
pub use document::BookDocument;
pub use keys::{KeyPress, ReaderAction};
pub use pager::{effective_page_count, Pager, Pages, DEFAULT_CHARS_PER_PAGE};
pub use position::ReadingPosition;
pub use toc::{build_toc, match_heading, ChapterEntry};
