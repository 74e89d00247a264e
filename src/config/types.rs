//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 书目与正文来源配置
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 阅读器配置
    #[serde(default)]
    pub reader: ReaderConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// GC 配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 书目与正文来源配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Open Library 基础 URL
    #[serde(default = "default_open_library_url")]
    pub open_library_url: String,

    /// Gutendex 基础 URL
    #[serde(default = "default_gutendex_url")]
    pub gutendex_url: String,

    /// Project Gutenberg 镜像
    #[serde(default = "default_gutenberg_url")]
    pub gutenberg_url: String,

    /// Internet Archive
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Internet Archive 的归档查看节点（`view_archive.php`）
    #[serde(default = "default_archive_view_url")]
    pub archive_view_url: String,

    /// 获取正文时使用的 CORS 中转前缀，空字符串表示直连
    #[serde(default)]
    pub cors_proxy: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,

    /// 每个主题抓取的作品数
    #[serde(default = "default_subject_limit")]
    pub subject_limit: usize,

    /// Open Library 检索结果数
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// 离线模式：只提供内置书目，不发出任何外部请求
    #[serde(default)]
    pub offline: bool,
}

fn default_open_library_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_gutendex_url() -> String {
    "https://gutendex.com".to_string()
}

fn default_gutenberg_url() -> String {
    "https://www.gutenberg.org".to_string()
}

fn default_archive_url() -> String {
    "https://archive.org".to_string()
}

fn default_archive_view_url() -> String {
    "https://ia800500.us.archive.org".to_string()
}

fn default_catalog_timeout() -> u64 {
    30
}

fn default_subject_limit() -> usize {
    100
}

fn default_search_limit() -> usize {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            open_library_url: default_open_library_url(),
            gutendex_url: default_gutendex_url(),
            gutenberg_url: default_gutenberg_url(),
            archive_url: default_archive_url(),
            archive_view_url: default_archive_view_url(),
            cors_proxy: String::new(),
            timeout_secs: default_catalog_timeout(),
            subject_limit: default_subject_limit(),
            search_limit: default_search_limit(),
            offline: false,
        }
    }
}

impl CatalogConfig {
    /// 中转前缀，未配置时为 None
    pub fn proxy(&self) -> Option<String> {
        let proxy = self.cors_proxy.trim();
        (!proxy.is_empty()).then(|| proxy.to_string())
    }
}

/// 阅读器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// 每页字符数
    #[serde(default = "default_chars_per_page")]
    pub chars_per_page: usize,

    /// 书库列表每次多展示的数量
    #[serde(default = "default_page_step")]
    pub page_step: usize,
}

fn default_chars_per_page() -> usize {
    2500
}

fn default_page_step() -> usize {
    20
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chars_per_page: default_chars_per_page(),
            page_step: default_page_step(),
        }
    }
}

/// 存储后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Sled 本地键值存储
    #[default]
    Sled,
    /// 进程内存（重启后丢失）
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sled => "sled",
            StorageBackend::Memory => "memory",
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Sled 数据库路径
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    "data/bookverse.sled".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            db_path: default_db_path(),
        }
    }
}

/// GC（垃圾回收）配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 是否启用自动 GC
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// GC 间隔时间（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// 阅读会话空闲过期时间（秒）
    #[serde(default = "default_session_expire")]
    pub session_expire_secs: u64,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    300 // 5 分钟
}

fn default_session_expire() -> u64 {
    3600 // 1 小时
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            session_expire_secs: default_session_expire(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
