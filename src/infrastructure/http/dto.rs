//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{PageView, ToggleBookmarkResponse};
use crate::domain::reader::ChapterEntry;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Reader DTOs
// ============================================================================

/// 只带会话 ID 的请求
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

/// 当前页
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub session_id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    /// 从 1 开始
    pub page: usize,
    pub page_count: usize,
    pub progress_percent: f64,
    pub content: String,
    pub bookmarked: bool,
}

impl From<PageView> for PageResponse {
    fn from(view: PageView) -> Self {
        Self {
            session_id: view.session_id,
            book_id: view.book_id,
            title: view.title,
            author: view.author,
            page: view.page,
            page_count: view.page_count,
            progress_percent: view.progress_percent,
            content: view.content,
            bookmarked: view.bookmarked,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub book_id: String,
    pub page: usize,
    pub bookmarked: bool,
    pub pages: Vec<usize>,
}

impl From<ToggleBookmarkResponse> for BookmarkResponse {
    fn from(r: ToggleBookmarkResponse) -> Self {
        Self {
            book_id: r.book_id,
            page: r.page,
            bookmarked: r.bookmarked,
            pages: r.pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TocEntryResponse {
    /// 目录序号，用于 `/reader/chapter`
    pub index: usize,
    pub title: String,
    pub page: usize,
}

impl TocEntryResponse {
    pub fn from_entries(entries: Vec<ChapterEntry>) -> Vec<Self> {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, e)| Self {
                index,
                title: e.title,
                page: e.page,
            })
            .collect()
    }
}
