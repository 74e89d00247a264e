//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod account_commands;
mod library_commands;
mod reader_commands;

pub mod handlers;

pub use account_commands::*;
pub use library_commands::*;
pub use reader_commands::*;
