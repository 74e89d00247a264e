//! Reader Queries

/// 当前页
#[derive(Debug, Clone)]
pub struct GetPage {
    pub session_id: String,
}

/// 会话对应书籍的目录
#[derive(Debug, Clone)]
pub struct GetToc {
    pub session_id: String,
}

/// 某本书的全部书签
#[derive(Debug, Clone)]
pub struct ListBookmarks {
    pub book_id: String,
}
