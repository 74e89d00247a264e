//! Text Adapters - 远程全文来源

mod remote_text_source;

pub use remote_text_source::{RemoteTextSource, RemoteTextSourceConfig};
