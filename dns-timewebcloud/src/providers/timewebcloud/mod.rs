//! Timeweb Cloud DNS API client

mod api;
mod http;
mod types;

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::{PluginError, Result};
use crate::utils::log_sanitizer::mask_secret;

pub use types::{AccountStatus, AccountStatusResponse};

pub(crate) const PROVIDER_NAME: &str = "timewebcloud";
pub(crate) const TW_API_BASE: &str = "https://api.timeweb.cloud";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP-layer settings for [`TimewebClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API endpoint, without trailing slash.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TW_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Timeweb Cloud API client for ACME challenge records.
///
/// Holds one persistent session carrying the JSON content type and the bearer
/// token, so the check/create/delete calls of a challenge share connections.
/// Building a client never touches the network.
#[derive(Debug, Clone)]
pub struct TimewebClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl TimewebClient {
    /// Client against the public API endpoint.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Client against another endpoint, e.g. a staging or mock server.
    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default().with_base_url(base_url))
    }

    pub fn with_config(api_key: &str, config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(PluginError::Configuration {
                detail: "API base URL must not be empty".to_string(),
            });
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            PluginError::InvalidCredentials {
                provider: PROVIDER_NAME.to_string(),
                detail: format!("API key is not a valid header value: {e}"),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PluginError::Configuration {
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        log::debug!(
            "[{PROVIDER_NAME}] Client for {base_url} with key {}",
            mask_secret(api_key)
        );

        Ok(Self { client, base_url })
    }

    /// API endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
