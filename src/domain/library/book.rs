//! 书籍实体

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// 封面占位图路径
pub const PLACEHOLDER_COVER: &str = "/abstract-book-cover.png";

const COVERS_BASE: &str = "https://covers.openlibrary.org/b";

/// 书库中的一本书
///
/// 不变量:
/// - `id` 在书库内唯一
/// - `has_full_text` 为 true 时至少有一个全文来源（Gutenberg ID 或本地上传文本）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gutenberg_id: Option<u64>,
    pub cover: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_library_key: Option<String>,
    #[serde(default)]
    pub has_full_text: bool,
}

impl Book {
    /// Gutenberg 书籍（带全文）
    pub fn gutenberg(
        gutenberg_id: u64,
        title: impl Into<String>,
        author: impl Into<String>,
        category: Category,
        cover: impl Into<String>,
    ) -> Self {
        Self {
            id: gutenberg_book_id(gutenberg_id),
            title: title.into(),
            author: author.into(),
            category,
            gutenberg_id: Some(gutenberg_id),
            cover: cover.into(),
            open_library_key: None,
            has_full_text: true,
        }
    }

    /// 本地上传的纯文本书籍
    pub fn local(title: impl Into<String>, author: impl Into<String>, category: Category) -> Self {
        Self {
            id: format!("local-{}", Uuid::new_v4()),
            title: title.into(),
            author: author.into(),
            category,
            gutenberg_id: None,
            cover: PLACEHOLDER_COVER.to_string(),
            open_library_key: None,
            has_full_text: true,
        }
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with("local-")
    }

    /// 标题或作者是否包含查询词（忽略大小写）
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.author.to_lowercase().contains(&query)
    }
}

/// Gutenberg 书籍的书库 ID
pub fn gutenberg_book_id(gutenberg_id: u64) -> String {
    format!("g-{}", gutenberg_id)
}

/// 从搜索结果的 key 推导书库 ID
///
/// `/works/OL1W` -> `OL1W`，`gutenberg-84` -> `g-84`
pub fn book_id_from_key(key: &str) -> String {
    key.replace("/works/", "").replace("gutenberg-", "g-")
}

/// Open Library 封面 ID 对应的大图
pub fn cover_url_by_id(cover_id: u64) -> String {
    format!("{}/id/{}-L.jpg", COVERS_BASE, cover_id)
}

/// Open Library 版本 key 对应的大图
pub fn cover_url_by_olid(edition_key: &str) -> String {
    format!("{}/olid/{}-L.jpg", COVERS_BASE, edition_key)
}
