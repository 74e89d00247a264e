//! Account Context - 账号上下文
//!
//! 只有注册与登录，没有会话令牌或权限模型。

mod errors;
mod user;

pub use errors::AccountError;
pub use user::{hash_password, User};
