//! Memory Layer - In-Memory State Management
//!
//! 阅读会话的内存状态，以及不落盘的 Repository 实现

mod repositories;
mod session_manager;

pub use repositories::{
    InMemoryBookTextRepository, InMemoryBookmarkRepository, InMemoryLibraryRepository,
    InMemoryUserRepository,
};
pub use session_manager::InMemorySessionManager;
