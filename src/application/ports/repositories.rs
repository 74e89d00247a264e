//! Repository Ports - 出站端口
//!
//! 本地键值存储的抽象接口
//! 具体实现在 infrastructure 层（Sled / 内存）

use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::account::User;
use crate::domain::library::Book;
use crate::domain::reader::BookmarkSet;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

// ============================================================================
// Library Repository
// ============================================================================

/// 书库（缓存的书目列表，保持顺序）
#[async_trait]
pub trait LibraryRepositoryPort: Send + Sync {
    /// 获取全部书籍
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, RepositoryError>;

    /// 整体替换书库
    async fn replace_all(&self, books: &[Book]) -> Result<(), RepositoryError>;

    /// 在写锁内把重建结果与当前书库合并后写入（见 `merge_rebuilt`），返回合并后的书库
    ///
    /// `snapshot` 为重建开始时读到的书籍 ID
    async fn rebuild(
        &self,
        snapshot: &HashSet<String>,
        rebuilt: Vec<Book>,
    ) -> Result<Vec<Book>, RepositoryError>;

    /// 插入到最前面，ID 已存在时返回 false
    async fn insert_front(&self, book: &Book) -> Result<bool, RepositoryError>;

    /// 删除，不存在时返回 false
    async fn remove(&self, id: &str) -> Result<bool, RepositoryError>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// 新增用户，邮箱重复时返回 `Duplicate`
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;
}

// ============================================================================
// Bookmark Repository
// ============================================================================

#[async_trait]
pub trait BookmarkRepositoryPort: Send + Sync {
    /// 获取某本书的书签，没有时返回空集合
    async fn find(&self, book_id: &str) -> Result<BookmarkSet, RepositoryError>;

    /// 原子地切换某页书签，返回切换后该页是否为书签以及最新集合
    async fn toggle(&self, book_id: &str, page: usize) -> Result<(bool, BookmarkSet), RepositoryError>;
}

// ============================================================================
// Book Text Repository
// ============================================================================

/// 本地上传的正文
#[async_trait]
pub trait BookTextRepositoryPort: Send + Sync {
    async fn find(&self, book_id: &str) -> Result<Option<String>, RepositoryError>;

    async fn save(&self, book_id: &str, text: &str) -> Result<(), RepositoryError>;

    async fn delete(&self, book_id: &str) -> Result<(), RepositoryError>;
}
