//! 分页器
//!
//! 将整本书的纯文本切分为固定大小的页，页边界尽量对齐到句号或换行。
//! 断点恰好落在候选结束位置上时，该页比 `chars_per_page` 多一个字符。
//!
//! 不变量:
//! - 所有页按顺序拼接后与原文完全一致（只移动分割点，不删除字符）
//! - 非空输入不会产生空页
//! - 长度与偏移按字符（Unicode 标量）计算，切片总在字符边界上

/// 默认每页字符数
pub const DEFAULT_CHARS_PER_PAGE: usize = 2500;

/// 边界调整后页长度的下限比例
const MIN_FILL_RATIO: f64 = 0.7;

/// 分页配置
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    chars_per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            chars_per_page: DEFAULT_CHARS_PER_PAGE,
        }
    }
}

impl Pager {
    /// 创建分页器，`chars_per_page` 为 0 时按 1 处理
    pub fn new(chars_per_page: usize) -> Self {
        Self {
            chars_per_page: chars_per_page.max(1),
        }
    }

    pub fn chars_per_page(&self) -> usize {
        self.chars_per_page
    }

    /// 惰性分页
    pub fn paginate<'a>(&self, text: &'a str) -> Pages<'a> {
        Pages {
            text,
            cursor: 0,
            chars_per_page: self.chars_per_page,
        }
    }

    /// 分页并收集为拥有所有权的页列表
    pub fn split(&self, text: &str) -> Vec<String> {
        self.paginate(text).map(str::to_string).collect()
    }
}

/// 页迭代器
///
/// 每次产出原文的一个连续切片；耗尽后需重新调用 [`Pager::paginate`]。
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    text: &'a str,
    /// 当前页起始字节偏移
    cursor: usize,
    chars_per_page: usize,
}

impl<'a> Pages<'a> {
    /// 计算下一页的结束字节偏移
    fn next_end(&self) -> usize {
        let rest = &self.text[self.cursor..];

        // 候选结束位置：向后数 chars_per_page 个字符
        let (candidate, candidate_char) = match rest.char_indices().nth(self.chars_per_page) {
            Some((offset, c)) => (self.cursor + offset, c),
            None => return self.text.len(),
        };

        // 从候选位置（含该字符）向前找最近的 '.' 或 '\n'
        let window = &self.text[self.cursor..candidate + candidate_char.len_utf8()];
        let Some(break_point) = window.rfind(|c: char| c == '.' || c == '\n') else {
            return candidate;
        };

        let min_chars = (self.chars_per_page as f64 * MIN_FILL_RATIO) as usize;
        if window[..break_point].chars().count() > min_chars {
            // '.' 和 '\n' 都是单字节，+1 仍落在字符边界上
            self.cursor + break_point + 1
        } else {
            candidate
        }
    }
}

impl<'a> Iterator for Pages<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.text.len() {
            return None;
        }

        let end = self.next_end();
        let page = &self.text[self.cursor..end];
        self.cursor = end;
        Some(page)
    }
}

impl std::iter::FusedIterator for Pages<'_> {}

/// 用于进度计算的页数（空书按 1 页计）
pub fn effective_page_count(pages: usize) -> usize {
    pages.max(1)
}
