//! 目录生成
//!
//! 在分页后的文本中按行匹配章节标题，生成可跳转的目录。
//! 找不到任何标题时，按页数均匀生成 "Section N" 占位条目。
//!
//! 这是启发式的大纲：漏识别和误识别都属于可接受行为。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// 标题最大字符数
const MAX_TITLE_CHARS: usize = 50;

/// 占位条目的目标数量
const SYNTHETIC_SECTIONS: usize = 10;

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(Chapter|CHAPTER|Part|PART|Book|BOOK|Section|SECTION)\s+[0-9IVXLCDM]+")
            .expect("heading pattern is a valid regex")
    })
}

/// 目录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    /// 标题（截断到 50 字符）
    pub title: String,
    /// 起始页（从 1 开始）
    pub page: usize,
}

impl ChapterEntry {
    pub fn new(title: impl Into<String>, page: usize) -> Self {
        Self {
            title: title.into(),
            page,
        }
    }
}

/// 判断一行是否为章节标题，返回截断后的标题
pub fn match_heading(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if heading_pattern().is_match(trimmed) {
        Some(trimmed.chars().take(MAX_TITLE_CHARS).collect())
    } else {
        None
    }
}

/// 根据页列表生成目录
///
/// 每页最多一个条目（取该页第一个匹配的行）；条目按页码升序。
pub fn build_toc<S: AsRef<str>>(pages: &[S]) -> Vec<ChapterEntry> {
    let mut toc: Vec<ChapterEntry> = pages
        .iter()
        .enumerate()
        .filter_map(|(index, page)| {
            page.as_ref()
                .split('\n')
                .find_map(match_heading)
                .map(|title| ChapterEntry::new(title, index + 1))
        })
        .collect();

    if toc.is_empty() {
        toc = synthetic_sections(pages.len().max(1));
    }

    toc
}

/// 均匀分布的占位条目
fn synthetic_sections(total_pages: usize) -> Vec<ChapterEntry> {
    let step = (total_pages / SYNTHETIC_SECTIONS).max(1);

    (0..total_pages)
        .step_by(step)
        .enumerate()
        .map(|(n, i)| ChapterEntry::new(format!("Section {}", n + 1), i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler_pages(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("Plain prose on page {} without any heading.", i + 1))
            .collect()
    }

    #[test]
    fn test_detects_chapters_on_their_pages() {
        let mut pages = filler_pages(10);
        pages[2] = "Some text\n  Chapter 1  \nMore text".to_string();
        pages[8] = "Chapter 2\nBody".to_string();

        let toc = build_toc(&pages);
        assert_eq!(
            toc,
            vec![ChapterEntry::new("Chapter 1", 3), ChapterEntry::new("Chapter 2", 9)]
        );
    }

    #[test]
    fn test_one_entry_per_page() {
        let pages = vec!["CHAPTER I\ntext\nCHAPTER II\ntext".to_string()];
        let toc = build_toc(&pages);
        assert_eq!(toc, vec![ChapterEntry::new("CHAPTER I", 1)]);
    }

    #[test]
    fn test_heading_variants() {
        assert!(match_heading("PART IV").is_some());
        assert!(match_heading("Book 12: The Return").is_some());
        assert!(match_heading("SECTION\t3").is_some());
        assert!(match_heading("Chapter One").is_none());
        assert!(match_heading("chapter 1").is_none());
        assert!(match_heading("Chapter1").is_none());
        assert!(match_heading("The Chapter 1").is_none());
        assert!(match_heading("Chapter ５").is_none());
        assert!(match_heading("CHAPTER ٣").is_none());
    }

    #[test]
    fn test_non_ascii_digits_fall_back_to_sections() {
        let pages = vec!["intro".to_string(), "CHAPTER ٣\nbody".to_string()];
        let toc = build_toc(&pages);
        assert_eq!(
            toc,
            vec![ChapterEntry::new("Section 1", 1), ChapterEntry::new("Section 2", 2)]
        );
    }

    #[test]
    fn test_title_truncated_to_fifty_chars() {
        let line = format!("Chapter 7 {}", "x".repeat(100));
        let title = match_heading(&line).unwrap();
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
        assert!(title.starts_with("Chapter 7 "));
    }

    #[test]
    fn test_synthetic_sections_for_25_pages() {
        let toc = build_toc(&filler_pages(25));
        let pages: Vec<usize> = toc.iter().map(|e| e.page).collect();

        assert_eq!(pages, (1..=25).step_by(2).collect::<Vec<_>>());
        assert_eq!(toc[0].title, "Section 1");
        assert_eq!(toc[1].title, "Section 2");
        assert_eq!(toc.last().unwrap().title, "Section 13");
    }

    #[test]
    fn test_synthetic_sections_for_small_books() {
        let toc = build_toc(&filler_pages(3));
        assert_eq!(
            toc,
            vec![
                ChapterEntry::new("Section 1", 1),
                ChapterEntry::new("Section 2", 2),
                ChapterEntry::new("Section 3", 3),
            ]
        );
    }

    #[test]
    fn test_empty_book_has_single_section() {
        let pages: Vec<String> = Vec::new();
        assert_eq!(build_toc(&pages), vec![ChapterEntry::new("Section 1", 1)]);
    }
}
