//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod catalog_queries;
mod library_queries;
mod reader_queries;

pub mod handlers;

pub use catalog_queries::*;
pub use library_queries::*;
pub use reader_queries::*;
