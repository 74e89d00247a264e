//! Configuration Loader
//!
//! 合并配置文件与环境变量；缺省值由 `types` 中各字段的 serde default 提供。
//!
//! 优先级（从高到低）：环境变量 > 配置文件 > 默认值

use config::{Config, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 环境变量前缀
const ENV_PREFIX: &str = "BOOKVERSE";

/// 未指定路径时依次尝试的配置文件（均可缺省）
const SEARCH_FILES: &[&str] = &["config", "config.local"];

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration sources: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Malformed configuration: {0}")]
    Parse(String),

    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// 加载应用配置
///
/// # 环境变量示例
/// - `BOOKVERSE_SERVER__PORT=8080`
/// - `BOOKVERSE_CATALOG__CORS_PROXY=https://corsproxy.io/?`
/// - `BOOKVERSE_CATALOG__OFFLINE=true`
/// - `BOOKVERSE_STORAGE__BACKEND=memory`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定文件加载；`None` 时在工作目录下搜索 `config.*` 与 `config.local.*`
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let files: Vec<File<_, _>> = match config_path {
        Some(path) => vec![File::from(path).required(true)],
        None => SEARCH_FILES
            .iter()
            .map(|name| File::with_name(name).required(false))
            .collect(),
    };

    let merged = files
        .into_iter()
        .fold(Config::builder(), |builder, file| builder.add_source(file))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = merged
        .try_deserialize()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate_config(&app_config)?;
    Ok(app_config)
}

/// 启动前的取值检查
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::invalid("server.port", "must be non-zero"));
    }
    if config.reader.chars_per_page == 0 {
        return Err(ConfigError::invalid("reader.chars_per_page", "must be positive"));
    }
    if config.reader.page_step == 0 {
        return Err(ConfigError::invalid("reader.page_step", "must be positive"));
    }

    // 离线模式不访问这些地址
    if !config.catalog.offline {
        let endpoints = [
            ("catalog.open_library_url", &config.catalog.open_library_url),
            ("catalog.gutendex_url", &config.catalog.gutendex_url),
            ("catalog.gutenberg_url", &config.catalog.gutenberg_url),
            ("catalog.archive_url", &config.catalog.archive_url),
            ("catalog.archive_view_url", &config.catalog.archive_view_url),
        ];
        if let Some(&(key, _)) = endpoints.iter().find(|(_, url)| url.trim().is_empty()) {
            return Err(ConfigError::invalid(key, "required unless catalog.offline is set"));
        }
    }

    if config.storage.db_path.trim().is_empty() {
        return Err(ConfigError::invalid("storage.db_path", "cannot be empty"));
    }
    if config.gc.enabled && config.gc.interval_secs == 0 {
        return Err(ConfigError::invalid(
            "gc.interval_secs",
            "must be non-zero while gc.enabled",
        ));
    }

    Ok(())
}

/// 启动日志中输出生效配置
pub fn print_config(config: &AppConfig) {
    let catalog = &config.catalog;
    if catalog.offline {
        tracing::info!(addr = %config.server.addr(), "Catalog offline, serving curated books only");
    } else {
        tracing::info!(
            addr = %config.server.addr(),
            open_library = %catalog.open_library_url,
            gutendex = %catalog.gutendex_url,
            gutenberg = %catalog.gutenberg_url,
            archive = %catalog.archive_url,
            archive_view = %catalog.archive_view_url,
            proxy = catalog.proxy().as_deref().unwrap_or("disabled"),
            timeout_secs = catalog.timeout_secs,
            "Catalog sources"
        );
    }

    tracing::info!(
        chars_per_page = config.reader.chars_per_page,
        page_step = config.reader.page_step,
        backend = config.storage.backend.as_str(),
        db_path = %config.storage.db_path,
        gc = config.gc.enabled,
        gc_interval_secs = config.gc.interval_secs,
        session_expire_secs = config.gc.session_expire_secs,
        log_level = %config.log.level,
        "Reader and storage settings"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::StorageBackend;
    use std::io::Write;

    fn rejected_key(config: &AppConfig) -> Option<&'static str> {
        match validate_config(config) {
            Err(ConfigError::Invalid { key, .. }) => Some(key),
            _ => None,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert_eq!(rejected_key(&config), Some("server.port"));

        let mut config = AppConfig::default();
        config.reader.chars_per_page = 0;
        assert_eq!(rejected_key(&config), Some("reader.chars_per_page"));

        let mut config = AppConfig::default();
        config.gc.interval_secs = 0;
        assert_eq!(rejected_key(&config), Some("gc.interval_secs"));
        config.gc.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_catalog_url_allowed_offline() {
        let mut config = AppConfig::default();
        config.catalog.gutendex_url = String::new();
        assert_eq!(rejected_key(&config), Some("catalog.gutendex_url"));

        config.catalog.offline = true;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_db_path_rejected() {
        let mut config = AppConfig::default();
        config.storage.db_path = "  ".to_string();
        assert_eq!(rejected_key(&config), Some("storage.db_path"));
    }

    #[test]
    fn test_load_from_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[reader]\nchars_per_page = 1200\n\n[storage]\nbackend = \"memory\"\n\n[catalog]\noffline = true\narchive_view_url = \"https://ia600.us.archive.org\""
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.reader.chars_per_page, 1200);
        assert_eq!(config.reader.page_step, 20);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.catalog.offline);
        assert_eq!(config.catalog.search_limit, 30);
        assert_eq!(config.catalog.archive_view_url, "https://ia600.us.archive.org");
        assert_eq!(config.catalog.archive_url, "https://archive.org");
        assert_eq!(config.server.port, 5060);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_config_from_path(Some(Path::new("/nonexistent/bookverse.toml")));
        assert!(matches!(err, Err(ConfigError::Source(_))));
    }
}
