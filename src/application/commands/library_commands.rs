//! Library Commands

use crate::domain::library::{CatalogHit, Category};

/// 加载书库（`force` 为 true 时忽略缓存重新抓取）
#[derive(Debug, Clone, Default)]
pub struct LoadLibrary {
    pub force: bool,
}

/// 将检索结果加入书库
#[derive(Debug, Clone)]
pub struct AddBookToLibrary {
    pub hit: CatalogHit,
}

/// 从书库移除
#[derive(Debug, Clone)]
pub struct RemoveBook {
    pub book_id: String,
}

/// 上传本地纯文本书籍
#[derive(Debug, Clone)]
pub struct UploadBook {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub text: String,
}
