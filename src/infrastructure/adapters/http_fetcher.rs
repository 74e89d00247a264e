//! HTTP Fetcher - 出站 GET 请求
//!
//! 封装 reqwest 客户端；可选地通过 CORS 中转前缀访问目标地址
//! （目标 URL 编码后拼接在前缀之后）。

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::application::ports::{CatalogError, TextSourceError};

/// 与浏览器 `encodeURIComponent` 一致的保留字符集
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// 对查询参数或整段 URL 做组件编码
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// 请求错误
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Failed to decode body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<FetchError> for CatalogError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Timeout => CatalogError::Timeout,
            FetchError::Network(msg) => CatalogError::NetworkError(msg),
            FetchError::Status(code) => CatalogError::ServiceError(format!("HTTP {}", code)),
            FetchError::Decode(msg) => CatalogError::InvalidResponse(msg),
        }
    }
}

impl From<FetchError> for TextSourceError {
    fn from(e: FetchError) -> Self {
        TextSourceError::NetworkError(e.to_string())
    }
}

/// HTTP Fetcher 配置
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// CORS 中转前缀，如 `https://corsproxy.io/?`；为空时直连
    pub cors_proxy: Option<String>,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            cors_proxy: None,
        }
    }
}

/// HTTP Fetcher
pub struct HttpFetcher {
    client: Client,
    cors_proxy: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: HttpFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let cors_proxy = config.cors_proxy.filter(|p| !p.trim().is_empty());
        Ok(Self { client, cors_proxy })
    }

    /// 实际请求的地址
    pub fn request_url(&self, target: &str) -> String {
        match &self.cors_proxy {
            Some(proxy) => format!("{}{}", proxy, encode_component(target)),
            None => target.to_string(),
        }
    }

    async fn get(&self, target: &str) -> Result<reqwest::Response, FetchError> {
        let url = self.request_url(target);
        tracing::debug!(url = %url, "Outbound GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, target: &str) -> Result<T, FetchError> {
        let response = self.get(target).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    pub async fn get_text(&self, target: &str) -> Result<String, FetchError> {
        Ok(self.get(target).await?.text().await?)
    }
}
