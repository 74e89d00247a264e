//! Session Sweeper - 空闲阅读会话回收

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::ReaderSessionManagerPort;

/// Sweeper 配置
#[derive(Debug, Clone)]
pub struct SessionSweeperConfig {
    /// 扫描间隔（秒）
    pub interval_secs: u64,
    /// 空闲超过该时长的会话被关闭（秒）
    pub session_expire_secs: u64,
}

impl Default for SessionSweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            session_expire_secs: 3600,
        }
    }
}

/// 会话回收器
pub struct SessionSweeper {
    config: SessionSweeperConfig,
    session_manager: Arc<dyn ReaderSessionManagerPort>,
}

impl SessionSweeper {
    pub fn new(
        config: SessionSweeperConfig,
        session_manager: Arc<dyn ReaderSessionManagerPort>,
    ) -> Self {
        Self {
            config,
            session_manager,
        }
    }

    /// 启动循环，直到任务被取消
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            session_expire_secs = self.config.session_expire_secs,
            "SessionSweeper started"
        );

        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs.max(1)));
        // 第一次 tick 立即返回
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.sweep_once();
        }
    }

    /// 关闭所有过期会话，返回关闭数量
    pub fn sweep_once(&self) -> usize {
        let expired = self
            .session_manager
            .get_expired_sessions(self.config.session_expire_secs);

        let mut closed = 0;
        for session_id in &expired {
            match self.session_manager.close(session_id) {
                Ok(()) => closed += 1,
                // 并发关闭时可能已不存在
                Err(e) => tracing::debug!(session_id = %session_id, error = %e, "Skip expired session"),
            }
        }

        if closed > 0 {
            tracing::info!(
                closed = closed,
                remaining = self.session_manager.list_all().len(),
                "Expired reader sessions closed"
            );
        }
        closed
    }
}
