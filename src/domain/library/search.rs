//! 目录检索结果的合并与匹配

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::book::{book_id_from_key, cover_url_by_id, PLACEHOLDER_COVER};
use super::{Book, Category};

/// 一条目录检索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogHit {
    /// Open Library 为 `/works/...`，Gutenberg 为 `gutenberg-<id>`
    pub key: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub cover_id: Option<u64>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub first_publish_year: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub gutenberg_id: Option<u64>,
    #[serde(default)]
    pub has_full_text: bool,
}

impl CatalogHit {
    /// 加入书库时使用的 ID
    pub fn book_id(&self) -> String {
        book_id_from_key(&self.key)
    }

    /// 转换为书库条目；`gutenberg_id` 为额外查到的全文 ID
    pub fn into_book(self, gutenberg_id: Option<u64>) -> Book {
        let id = self.book_id();
        let cover = self
            .cover_url
            .clone()
            .or_else(|| self.cover_id.map(cover_url_by_id))
            .unwrap_or_else(|| PLACEHOLDER_COVER.to_string());
        let gutenberg_id = self.gutenberg_id.or(gutenberg_id);

        Book {
            id,
            category: Category::from_subject(&self.subject),
            cover,
            has_full_text: gutenberg_id.is_some() || self.has_full_text,
            gutenberg_id,
            open_library_key: Some(self.key),
            title: self.title,
            author: self.author,
        }
    }
}

/// 标题去重键：小写后只保留 a-z0-9
pub fn title_key(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// 合并两路检索结果
///
/// Gutenberg 结果在前（有全文），再追加 Open Library 结果；按标题键去重。
pub fn merge_hits(gutenberg: Vec<CatalogHit>, open_library: Vec<CatalogHit>) -> Vec<CatalogHit> {
    let mut seen = HashSet::new();
    gutenberg
        .into_iter()
        .chain(open_library)
        .filter(|hit| seen.insert(title_key(&hit.title)))
        .collect()
}

/// Gutendex 候选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutenbergCandidate {
    pub id: u64,
    pub title: String,
}

/// 在候选列表中选出与标题最接近的 Gutenberg ID
///
/// 规范化标题互相包含即视为匹配；否则退回第一个结果。
pub fn best_gutenberg_match(title: &str, candidates: &[GutenbergCandidate]) -> Option<u64> {
    let wanted = title_key(title);
    candidates
        .iter()
        .find(|c| {
            let key = title_key(&c.title);
            key.contains(&wanted) || wanted.contains(&key)
        })
        .or_else(|| candidates.first())
        .map(|c| c.id)
}
