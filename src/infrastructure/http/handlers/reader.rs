//! Reader HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    CloseReader, GetPage, GetToc, GoToChapter, GoToPage, KeyOutcome, ListBookmarks, OpenBook,
    PageDirection, PressKey, ToggleBookmark, TurnPage,
};
use crate::domain::reader::KeyPress;
use crate::infrastructure::http::dto::{
    ApiResponse, BookmarkResponse, Empty, PageResponse, SessionRequest, TocEntryResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenBookRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct OpenBookResponse {
    pub page: PageResponse,
    /// local | remote | fallback
    pub text_origin: &'static str,
    pub chapters: usize,
}

#[derive(Debug, Deserialize)]
pub struct GoToPageRequest {
    pub session_id: String,
    /// 从 1 开始，越界时截断
    pub page: i64,
}

#[derive(Debug, Deserialize)]
pub struct GoToChapterRequest {
    pub session_id: String,
    pub chapter: usize,
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub session_id: String,
    #[serde(flatten)]
    pub key: KeyPress,
}

#[derive(Debug, Serialize)]
pub struct KeyResponse {
    /// ignored | page | bookmark | closed
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<BookmarkResponse>,
}

#[derive(Debug, Serialize)]
pub struct TocResponse {
    pub current_page: usize,
    pub entries: Vec<TocEntryResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ListBookmarksRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct BookmarksResponse {
    pub book_id: String,
    pub pages: Vec<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 打开书籍，返回第 1 页
pub async fn open_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenBookRequest>,
) -> Result<Json<ApiResponse<OpenBookResponse>>, ApiError> {
    let result = state
        .open_book_handler
        .handle(OpenBook {
            book_id: req.book_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(OpenBookResponse {
        page: result.view.into(),
        text_origin: result.text_origin,
        chapters: result.chapters,
    })))
}

/// 当前页
pub async fn current_page(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<PageResponse>>, ApiError> {
    let view = state
        .get_page_handler
        .handle(GetPage {
            session_id: req.session_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(view.into())))
}

/// 下一页
pub async fn next_page(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<PageResponse>>, ApiError> {
    turn(&state, req.session_id, PageDirection::Next).await
}

/// 上一页
pub async fn prev_page(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<PageResponse>>, ApiError> {
    turn(&state, req.session_id, PageDirection::Prev).await
}

async fn turn(
    state: &AppState,
    session_id: String,
    direction: PageDirection,
) -> Result<Json<ApiResponse<PageResponse>>, ApiError> {
    let view = state
        .navigate_handler
        .turn(TurnPage {
            session_id,
            direction,
        })
        .await?;
    Ok(Json(ApiResponse::success(view.into())))
}

/// 跳页
pub async fn go_to_page(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoToPageRequest>,
) -> Result<Json<ApiResponse<PageResponse>>, ApiError> {
    let view = state
        .navigate_handler
        .go_to(GoToPage {
            session_id: req.session_id,
            page: req.page,
        })
        .await?;
    Ok(Json(ApiResponse::success(view.into())))
}

/// 跳到目录项
pub async fn go_to_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoToChapterRequest>,
) -> Result<Json<ApiResponse<PageResponse>>, ApiError> {
    let view = state
        .navigate_handler
        .go_to_chapter(GoToChapter {
            session_id: req.session_id,
            chapter: req.chapter,
        })
        .await?;
    Ok(Json(ApiResponse::success(view.into())))
}

/// 快捷键
pub async fn press_key(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeyRequest>,
) -> Result<Json<ApiResponse<KeyResponse>>, ApiError> {
    let outcome = state
        .press_key_handler
        .handle(PressKey {
            session_id: req.session_id,
            key: req.key,
        })
        .await?;

    let kind = outcome.kind();
    let (page, bookmark): (Option<PageResponse>, Option<BookmarkResponse>) = match outcome {
        KeyOutcome::Page(view) => (Some(view.into()), None),
        KeyOutcome::Bookmark(result) => (None, Some(result.into())),
        KeyOutcome::Ignored | KeyOutcome::Closed => (None, None),
    };

    Ok(Json(ApiResponse::success(KeyResponse {
        outcome: kind,
        page,
        bookmark,
    })))
}

/// 切换当前页书签
pub async fn toggle_bookmark(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<BookmarkResponse>>, ApiError> {
    let result = state
        .toggle_bookmark_handler
        .handle(ToggleBookmark {
            session_id: req.session_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(result.into())))
}

/// 某本书的全部书签
pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListBookmarksRequest>,
) -> Result<Json<ApiResponse<BookmarksResponse>>, ApiError> {
    let pages = state
        .list_bookmarks_handler
        .handle(ListBookmarks {
            book_id: req.book_id.clone(),
        })
        .await?;
    Ok(Json(ApiResponse::success(BookmarksResponse {
        book_id: req.book_id,
        pages,
    })))
}

/// 目录
pub async fn table_of_contents(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<TocResponse>>, ApiError> {
    let toc = state.get_toc_handler.handle(GetToc {
        session_id: req.session_id,
    })?;
    Ok(Json(ApiResponse::success(TocResponse {
        current_page: toc.current_page,
        entries: TocEntryResponse::from_entries(toc.entries),
    })))
}

/// 关闭阅读器
pub async fn close_reader(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.close_reader_handler.handle(CloseReader {
        session_id: req.session_id,
    })?;
    Ok(Json(ApiResponse::ok()))
}
