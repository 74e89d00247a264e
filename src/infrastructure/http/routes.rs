//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                   GET   健康检查
//! - /api/account/register       POST  注册
//! - /api/account/login          POST  登录
//! - /api/library/list           GET   书库列表（category / search / displayed）
//! - /api/library/refresh        POST  重新加载书库
//! - /api/library/add            POST  将检索结果加入书库
//! - /api/library/remove         POST  移除书籍
//! - /api/library/upload         POST  上传 TXT（multipart）
//! - /api/library/export/:id     GET   导出纯文本
//! - /api/catalog/search         POST  检索 Gutenberg + Open Library
//! - /api/reader/open            POST  打开书籍（创建阅读会话）
//! - /api/reader/page            POST  当前页
//! - /api/reader/next            POST  下一页
//! - /api/reader/prev            POST  上一页
//! - /api/reader/goto            POST  跳页
//! - /api/reader/chapter         POST  跳到目录项
//! - /api/reader/key             POST  快捷键
//! - /api/reader/bookmark        POST  切换书签
//! - /api/reader/bookmarks       POST  书签列表
//! - /api/reader/toc             POST  目录
//! - /api/reader/close           POST  关闭阅读器

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/account", account_routes())
        .nest("/library", library_routes())
        .nest("/catalog", catalog_routes())
        .nest("/reader", reader_routes())
}

/// Account 路由
fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

/// Library 路由
fn library_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_books))
        .route("/refresh", post(handlers::refresh_library))
        .route("/add", post(handlers::add_book))
        .route("/remove", post(handlers::remove_book))
        .route("/upload", post(handlers::upload_book))
        .route("/export/:book_id", get(handlers::export_book))
}

/// Catalog 路由
fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new().route("/search", post(handlers::search_catalog))
}

/// Reader 路由
fn reader_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/open", post(handlers::open_book))
        .route("/page", post(handlers::current_page))
        .route("/next", post(handlers::next_page))
        .route("/prev", post(handlers::prev_page))
        .route("/goto", post(handlers::go_to_page))
        .route("/chapter", post(handlers::go_to_chapter))
        .route("/key", post(handlers::press_key))
        .route("/bookmark", post(handlers::toggle_bookmark))
        .route("/bookmarks", post(handlers::list_bookmarks))
        .route("/toc", post(handlers::table_of_contents))
        .route("/close", post(handlers::close_reader))
}
