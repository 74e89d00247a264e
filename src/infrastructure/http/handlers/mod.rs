//! HTTP Handlers

mod account;
mod catalog;
mod library;
mod ping;
mod reader;

pub use account::*;
pub use catalog::*;
pub use library::*;
pub use ping::*;
pub use reader::*;
