//! Reader Session Manager Port - 阅读会话生命周期管理
//!
//! 定义会话管理的抽象接口，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::library::Book;
use crate::domain::reader::{BookDocument, ReadingPosition};

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),
}

/// 阅读会话（in-memory）
///
/// 打开一本书时创建，关闭阅读器时丢弃。
#[derive(Debug, Clone)]
pub struct ReaderSession {
    pub id: String,
    pub book: Book,
    pub document: Arc<BookDocument>,
    pub position: ReadingPosition,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ReaderSession {
    pub fn new(book: Book, document: BookDocument) -> Self {
        let now = Utc::now();
        let position = ReadingPosition::new(document.page_count());
        Self {
            id: Uuid::new_v4().to_string(),
            book,
            document: Arc::new(document),
            position,
            created_at: now,
            last_activity: now,
        }
    }
}

/// Reader Session Manager Port
///
/// 所有状态存储在内存中；并发更新按最后写入生效
pub trait ReaderSessionManagerPort: Send + Sync {
    /// 创建新会话
    fn create(&self, session: ReaderSession) -> Result<String, SessionError>;

    /// 获取会话
    fn get(&self, id: &str) -> Result<ReaderSession, SessionError>;

    /// 更新阅读位置
    fn update_position(&self, id: &str, position: ReadingPosition) -> Result<(), SessionError>;

    /// 关闭会话
    fn close(&self, id: &str) -> Result<(), SessionError>;

    /// 刷新最后活动时间（只读操作也算活动）
    fn touch(&self, id: &str);

    /// 获取所有过期会话的 ID
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;

    /// 获取所有会话 ID
    fn list_all(&self) -> Vec<String>;
}
