//! 书签集合

use serde::{Deserialize, Serialize};

/// 单本书的书签页码（按添加顺序保存）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkSet {
    pages: Vec<usize>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<usize>) -> Self {
        let mut set = Self::new();
        for page in pages {
            if !set.contains(page) {
                set.pages.push(page);
            }
        }
        set
    }

    pub fn contains(&self, page: usize) -> bool {
        self.pages.contains(&page)
    }

    /// 切换书签：已存在则移除，否则追加
    ///
    /// 返回切换后该页是否处于书签状态
    pub fn toggle(&mut self, page: usize) -> bool {
        if let Some(pos) = self.pages.iter().position(|&p| p == page) {
            self.pages.remove(pos);
            false
        } else {
            self.pages.push(page);
            true
        }
    }

    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
