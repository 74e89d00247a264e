//! Library HTTP Handlers

use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    AddBookToLibrary, ExportBook, ListBooks, LoadLibrary, RemoveBook, UploadBook,
};
use crate::domain::library::{Book, CatalogHit, Category};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 上传文件大小上限
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListBooksParams {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub search: String,
    pub displayed: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
    pub total: usize,
    pub has_more: bool,
    pub next_displayed: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshLibraryRequest {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct RefreshLibraryResponse {
    pub total: usize,
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AddBookResponse {
    pub book: Book,
    pub already_present: bool,
}

#[derive(Debug, Deserialize)]
pub struct RemoveBookRequest {
    pub book_id: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 书库列表（分类 + 关键词 + 展示窗口）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListBooksParams>,
) -> Result<Json<ApiResponse<ListBooksResponse>>, ApiError> {
    let query = ListBooks {
        category: params.category,
        search: params.search,
        displayed: params.displayed,
    };
    let result = state.list_books_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ListBooksResponse {
        books: result.window.books,
        total: result.window.total,
        has_more: result.window.has_more,
        next_displayed: result.next_displayed,
    })))
}

/// 重新加载书库（默认命中缓存时直接返回）
pub async fn refresh_library(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RefreshLibraryRequest>>,
) -> Result<Json<ApiResponse<RefreshLibraryResponse>>, ApiError> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let result = state
        .load_library_handler
        .handle(LoadLibrary { force: req.force })
        .await?;

    Ok(Json(ApiResponse::success(RefreshLibraryResponse {
        total: result.total,
        source: result.source.as_str(),
    })))
}

/// 将检索结果加入书库
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(hit): Json<CatalogHit>,
) -> Result<Json<ApiResponse<AddBookResponse>>, ApiError> {
    let result = state
        .add_book_handler
        .handle(AddBookToLibrary { hit })
        .await?;

    Ok(Json(ApiResponse::success(AddBookResponse {
        book: result.book,
        already_present: !result.added,
    })))
}

/// 从书库移除
pub async fn remove_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemoveBookRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .remove_book_handler
        .handle(RemoveBook {
            book_id: req.book_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

/// 上传 TXT 书籍
///
/// 字段: `file`（必填）、`title`、`author`、`category`
pub async fn upload_book(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let mut title: Option<String> = None;
    let mut author = String::new();
    let mut category = Category::Fiction;
    let mut content: Option<String> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "title" | "author" | "category" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read {}: {}", field_name, e))
                })?;
                match field_name.as_str() {
                    "title" => title = Some(value),
                    "author" => author = value,
                    _ => {
                        category = Category::from_str(value.trim()).ok_or_else(|| {
                            ApiError::BadRequest(format!("Unknown category: {}", value))
                        })?;
                    }
                }
            }
            "file" => {
                filename = field.file_name().map(|s| s.to_string());

                let content_type = field.content_type().unwrap_or("application/octet-stream");
                let is_txt = filename
                    .as_ref()
                    .map(|f| f.to_lowercase().ends_with(".txt"))
                    .unwrap_or(false);
                if !is_txt && !content_type.contains("text") {
                    return Err(ApiError::BadRequest("Only TXT files are allowed".to_string()));
                }

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(ApiError::BadRequest(format!(
                        "File too large. Maximum size is {} MB",
                        MAX_UPLOAD_BYTES / 1024 / 1024
                    )));
                }

                content = Some(String::from_utf8(bytes.to_vec()).map_err(|_| {
                    ApiError::BadRequest("File must be valid UTF-8 text".to_string())
                })?);
            }
            _ => {}
        }
    }

    let text = content.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;

    // 未给标题时用文件名
    let title = title.filter(|t| !t.trim().is_empty()).unwrap_or_else(|| {
        filename
            .as_ref()
            .and_then(|f| {
                PathBuf::from(f)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| "Untitled".to_string())
    });

    let book = state
        .upload_book_handler
        .handle(UploadBook {
            title,
            author,
            category,
            text,
        })
        .await?;

    Ok(Json(ApiResponse::success(book)))
}

/// 导出纯文本（作为附件下载）
pub async fn export_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Response, ApiError> {
    let exported = state
        .export_book_handler
        .handle(ExportBook { book_id })
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", exported.file_name),
        )
        .body(Body::from(exported.content))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
