//! Catalog Query Handlers

use std::sync::Arc;

use futures_util::future::join;

use crate::application::error::ApplicationError;
use crate::application::ports::{GutenbergCatalogPort, OpenLibraryPort};
use crate::application::queries::SearchCatalog;
use crate::domain::library::{merge_hits, CatalogHit};

/// SearchCatalog Handler
///
/// 两个目录并发检索；任一方失败只丢弃该方结果。
pub struct SearchCatalogHandler {
    gutenberg: Arc<dyn GutenbergCatalogPort>,
    open_library: Arc<dyn OpenLibraryPort>,
    limit: usize,
}

impl SearchCatalogHandler {
    pub fn new(
        gutenberg: Arc<dyn GutenbergCatalogPort>,
        open_library: Arc<dyn OpenLibraryPort>,
        limit: usize,
    ) -> Self {
        Self {
            gutenberg,
            open_library,
            limit,
        }
    }

    pub async fn handle(&self, query: SearchCatalog) -> Result<Vec<CatalogHit>, ApplicationError> {
        let term = query.query.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let (gutenberg, open_library) = join(
            self.gutenberg.search(term),
            self.open_library.search(term, self.limit),
        )
        .await;

        let gutenberg = gutenberg.unwrap_or_else(|e| {
            tracing::warn!(query = %term, error = %e, "Gutenberg search failed");
            Vec::new()
        });
        let open_library = open_library.unwrap_or_else(|e| {
            tracing::warn!(query = %term, error = %e, "Open Library search failed");
            Vec::new()
        });

        let hits = merge_hits(gutenberg, open_library);
        tracing::info!(query = %term, results = hits.len(), "Catalog searched");
        Ok(hits)
    }
}
