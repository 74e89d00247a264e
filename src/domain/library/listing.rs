//! 书库列表的筛选与分批展示

use super::{Book, CategoryFilter};

/// 每次 "加载更多" 增加的条目数
pub const DEFAULT_PAGE_STEP: usize = 20;

/// 一次列表请求的结果窗口
#[derive(Debug, Clone)]
pub struct LibraryWindow {
    pub books: Vec<Book>,
    /// 筛选后的总数
    pub total: usize,
    pub has_more: bool,
}

/// 按分类和关键词筛选，返回前 `displayed` 条
pub fn filter_window(
    books: &[Book],
    category: CategoryFilter,
    query: &str,
    displayed: usize,
) -> LibraryWindow {
    let query = query.trim();
    let filtered: Vec<&Book> = books
        .iter()
        .filter(|b| category.matches(b.category) && b.matches_query(query))
        .collect();

    let total = filtered.len();
    let shown = displayed.min(total);

    LibraryWindow {
        books: filtered.into_iter().take(shown).cloned().collect(),
        total,
        has_more: shown < total,
    }
}

/// 下一次 "加载更多" 后的展示数量
pub fn next_displayed(displayed: usize, step: usize, total: usize) -> usize {
    (displayed + step).min(total)
}
