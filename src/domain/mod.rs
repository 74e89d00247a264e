//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Reader Context: 分页、目录、阅读位置、书签
//! - Library Context: 书库与目录检索
//! - Account Context: 注册与登录

pub mod account;
pub mod library;
pub mod reader;
