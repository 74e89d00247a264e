//! 已分页的书籍文档

use super::pager::{effective_page_count, Pager};
use super::toc::{build_toc, ChapterEntry};

/// 一次阅读会话中的书籍正文
///
/// 页与目录在创建时一次性计算，之后只读；文本变化时需重新创建。
#[derive(Debug, Clone)]
pub struct BookDocument {
    pages: Vec<String>,
    toc: Vec<ChapterEntry>,
    char_count: usize,
}

impl BookDocument {
    pub fn new(text: &str, pager: &Pager) -> Self {
        let pages = pager.split(text);
        let toc = build_toc(&pages);
        Self {
            pages,
            toc,
            char_count: text.chars().count(),
        }
    }

    /// 页数（空书按 1 页计）
    pub fn page_count(&self) -> usize {
        effective_page_count(self.pages.len())
    }

    /// 获取指定页内容（页码从 1 开始），越界返回空串
    pub fn page(&self, number: usize) -> &str {
        number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn toc(&self) -> &[ChapterEntry] {
        &self.toc
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// 还原全文
    pub fn text(&self) -> String {
        self.pages.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_text() {
        let body = "CHAPTER I\nIt was a dark night.\n".repeat(200);
        let doc = BookDocument::new(&body, &Pager::new(500));

        assert!(doc.page_count() > 1);
        assert_eq!(doc.text(), body);
        assert_eq!(doc.toc()[0].page, 1);
        assert!(doc.page(1).starts_with("CHAPTER I"));
        assert_eq!(doc.page(0), "");
        assert_eq!(doc.page(doc.page_count() + 1), "");
    }

    #[test]
    fn test_empty_document() {
        let doc = BookDocument::new("", &Pager::default());
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.page(1), "");
        assert_eq!(doc.toc().len(), 1);
    }
}
