//! BookVerse - 在线图书馆与阅读器
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Reader Context: 分页、目录、阅读进度、书签、快捷键
//! - Library Context: 书库、分类、检索结果合并、正文整理
//! - Account Context: 本地账户
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SessionManager, Repositories, Catalog, TextSource）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: SessionManager 与 Repository 内存实现
//! - Worker: 阅读会话回收
//! - Persistence: Sled 存储
//! - Adapters: Open Library / Gutendex / 正文镜像客户端，离线目录

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
