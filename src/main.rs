//! BookVerse - 在线图书馆与阅读器
//!
//! 分层结构:
//! - Domain: reader/, library/, account/
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, worker, persistence, adapters

use std::sync::Arc;

use bookverse::application::{
    GutenbergCatalogPort, LoadLibrary, OpenLibraryPort, TextSourcePort,
};
use bookverse::config::{load_config, print_config, AppConfig, StorageBackend};
use bookverse::infrastructure::adapters::{
    GutendexClient, HttpFetcher, HttpFetcherConfig, OfflineCatalog, OpenLibraryClient,
    RemoteTextSource, RemoteTextSourceConfig,
};
use bookverse::infrastructure::http::{AppPorts, AppSettings, AppState, HttpServer, ServerConfig};
use bookverse::infrastructure::memory::{
    InMemoryBookTextRepository, InMemoryBookmarkRepository, InMemoryLibraryRepository,
    InMemorySessionManager, InMemoryUserRepository,
};
use bookverse::infrastructure::persistence::{
    SledBookTextRepository, SledBookmarkRepository, SledLibraryRepository, SledStore,
    SledStoreConfig, SledUserRepository,
};
use bookverse::infrastructure::worker::{SessionSweeper, SessionSweeperConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},bookverse={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("BookVerse - 在线图书馆与阅读器");
    print_config(&config);

    let session_manager = Arc::new(InMemorySessionManager::new());
    let ports = build_ports(&config, session_manager.clone()).await?;

    let settings = AppSettings {
        chars_per_page: config.reader.chars_per_page,
        page_step: config.reader.page_step,
        subject_limit: config.catalog.subject_limit,
        search_limit: config.catalog.search_limit,
    };
    let state = Arc::new(AppState::new(ports, settings));

    // 后台初始化书库，失败只记录日志
    let loader = state.clone();
    tokio::spawn(async move {
        if let Err(e) = loader.load_library_handler.handle(LoadLibrary::default()).await {
            tracing::error!(error = %e, "Failed to load library");
        }
    });

    // 启动会话回收
    if config.gc.enabled {
        let sweeper = SessionSweeper::new(
            SessionSweeperConfig {
                interval_secs: config.gc.interval_secs,
                session_expire_secs: config.gc.session_expire_secs,
            },
            session_manager,
        );
        tokio::spawn(sweeper.run());
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::from(&config.server);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 按配置组装存储与外部服务适配器
async fn build_ports(
    config: &AppConfig,
    session_manager: Arc<InMemorySessionManager>,
) -> anyhow::Result<AppPorts> {
    let (open_library, gutenberg, text_source) = build_catalog(config)?;

    let ports = match config.storage.backend {
        StorageBackend::Sled => {
            // 确保数据目录存在
            if let Some(parent) = std::path::Path::new(&config.storage.db_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let store = SledStore::new(&SledStoreConfig {
                db_path: config.storage.db_path.clone(),
            })?;
            AppPorts {
                session_manager,
                library_repo: Arc::new(SledLibraryRepository::new(store.clone())),
                user_repo: Arc::new(SledUserRepository::new(store.clone())),
                bookmark_repo: Arc::new(SledBookmarkRepository::new(store.clone())),
                text_repo: Arc::new(SledBookTextRepository::new(store)),
                open_library,
                gutenberg,
                text_source,
            }
        }
        StorageBackend::Memory => AppPorts {
            session_manager,
            library_repo: Arc::new(InMemoryLibraryRepository::new()),
            user_repo: Arc::new(InMemoryUserRepository::new()),
            bookmark_repo: Arc::new(InMemoryBookmarkRepository::new()),
            text_repo: Arc::new(InMemoryBookTextRepository::new()),
            open_library,
            gutenberg,
            text_source,
        },
    };

    Ok(ports)
}

type CatalogPorts = (
    Arc<dyn OpenLibraryPort>,
    Arc<dyn GutenbergCatalogPort>,
    Arc<dyn TextSourcePort>,
);

/// 书目与正文来源：离线模式只用内置书目
fn build_catalog(config: &AppConfig) -> anyhow::Result<CatalogPorts> {
    if config.catalog.offline {
        let offline = Arc::new(OfflineCatalog::new());
        let ports: CatalogPorts = (offline.clone(), offline.clone(), offline);
        return Ok(ports);
    }

    // 书目检索直连，正文解析走 CORS 中转
    let catalog_fetcher = Arc::new(HttpFetcher::new(HttpFetcherConfig {
        timeout_secs: config.catalog.timeout_secs,
        cors_proxy: None,
    })?);
    let text_fetcher = Arc::new(HttpFetcher::new(HttpFetcherConfig {
        timeout_secs: config.catalog.timeout_secs,
        cors_proxy: config.catalog.proxy(),
    })?);

    let open_library: Arc<dyn OpenLibraryPort> = Arc::new(OpenLibraryClient::new(
        catalog_fetcher.clone(),
        &config.catalog.open_library_url,
    ));
    let gutenberg: Arc<dyn GutenbergCatalogPort> = Arc::new(GutendexClient::new(
        catalog_fetcher,
        &config.catalog.gutendex_url,
    ));

    // 正文解析中的版本查询同样经过中转
    let editions = Arc::new(OpenLibraryClient::new(
        text_fetcher.clone(),
        &config.catalog.open_library_url,
    ));
    let text_source: Arc<dyn TextSourcePort> = Arc::new(RemoteTextSource::new(
        text_fetcher,
        editions,
        RemoteTextSourceConfig {
            gutenberg_url: config.catalog.gutenberg_url.clone(),
            archive_url: config.catalog.archive_url.clone(),
            archive_view_url: config.catalog.archive_view_url.clone(),
        },
    ));

    Ok((open_library, gutenberg, text_source))
}
