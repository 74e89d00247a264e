//! Catalog Queries

/// 同时检索 Gutenberg 与 Open Library
#[derive(Debug, Clone)]
pub struct SearchCatalog {
    pub query: String,
}
