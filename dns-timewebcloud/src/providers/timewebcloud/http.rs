//! Timeweb Cloud HTTP 请求方法

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;

use super::{PROVIDER_NAME, TimewebClient};

impl TimewebClient {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// 执行 GET 请求，要求 2xx 并解析 JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let (status, text) =
            HttpUtils::execute_request(self.client.get(&url), PROVIDER_NAME, "GET", &url).await?;
        HttpUtils::ensure_success(status, &text, PROVIDER_NAME)?;
        HttpUtils::parse_json(&text, PROVIDER_NAME)
    }

    /// 执行 POST 请求，返回原始状态码与响应体
    pub(crate) async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(u16, String)> {
        let url = self.url(path);
        if log::log_enabled!(log::Level::Debug) {
            let body_json = serde_json::to_string(body)
                .unwrap_or_else(|_| "<unserializable body>".to_string());
            log::debug!("[{PROVIDER_NAME}] Request Body: {body_json}");
        }
        HttpUtils::execute_request(self.client.post(&url).json(body), PROVIDER_NAME, "POST", &url)
            .await
    }

    /// 执行 DELETE 请求，返回原始状态码与响应体
    pub(crate) async fn delete(&self, path: &str) -> Result<(u16, String)> {
        let url = self.url(path);
        HttpUtils::execute_request(self.client.delete(&url), PROVIDER_NAME, "DELETE", &url).await
    }
}
