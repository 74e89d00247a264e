//! Reader Commands

use crate::domain::reader::KeyPress;

/// 打开书籍，创建阅读会话
#[derive(Debug, Clone)]
pub struct OpenBook {
    pub book_id: String,
}

/// 翻页方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Prev,
}

/// 翻页
#[derive(Debug, Clone)]
pub struct TurnPage {
    pub session_id: String,
    pub direction: PageDirection,
}

/// 跳转到指定页（越界时截断）
#[derive(Debug, Clone)]
pub struct GoToPage {
    pub session_id: String,
    pub page: i64,
}

/// 切换当前页书签
#[derive(Debug, Clone)]
pub struct ToggleBookmark {
    pub session_id: String,
}

/// 处理快捷键
#[derive(Debug, Clone)]
pub struct PressKey {
    pub session_id: String,
    pub key: KeyPress,
}

/// 关闭阅读器
#[derive(Debug, Clone)]
pub struct CloseReader {
    pub session_id: String,
}

/// 跳转到目录中的第 `chapter` 项（从 0 开始）
#[derive(Debug, Clone)]
pub struct GoToChapter {
    pub session_id: String,
    pub chapter: usize,
}
