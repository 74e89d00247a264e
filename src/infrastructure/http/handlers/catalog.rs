//! Catalog HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::SearchCatalog;
use crate::domain::library::CatalogHit;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchCatalogRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchCatalogResponse {
    pub total: usize,
    pub results: Vec<CatalogHit>,
}

/// 检索 Gutenberg + Open Library
pub async fn search_catalog(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchCatalogRequest>,
) -> Result<Json<ApiResponse<SearchCatalogResponse>>, ApiError> {
    let results = state
        .search_catalog_handler
        .handle(SearchCatalog { query: req.query })
        .await?;

    Ok(Json(ApiResponse::success(SearchCatalogResponse {
        total: results.len(),
        results,
    })))
}
