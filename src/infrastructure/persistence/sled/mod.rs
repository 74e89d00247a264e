//! Sled 存储
//!
//! 所有数据以 JSON 存放在固定键名下：
//! - `bookverse_library`: 书库列表
//! - `bookverse_users`: 用户列表
//! - `bookverse_bookmarks:{book_id}`: 书签页码
//! - `bookverse_text:{book_id}`: 上传的正文

mod library_repo;
mod reading_repo;
mod store;
mod user_repo;

pub use library_repo::SledLibraryRepository;
pub use reading_repo::{SledBookTextRepository, SledBookmarkRepository};
pub use store::{SledStore, SledStoreConfig};
pub use user_repo::SledUserRepository;
