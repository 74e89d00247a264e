//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod catalog;
pub mod http_fetcher;
pub mod text;

pub use catalog::*;
pub use http_fetcher::{encode_component, FetchError, HttpFetcher, HttpFetcherConfig};
pub use text::*;
