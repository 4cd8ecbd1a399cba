//! Generic HTTP client tools
//!
//! Shared request processing for the API client: sending, logging, status
//! checking and JSON parsing. Requests are sent exactly once; retry policy
//! belongs to the host framework.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::PluginError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, body; session headers come from the client)
    /// * `provider_name` - Provider name (for logging)
    /// * `method_name` - request method name (such as "GET", "POST", used for logs)
    /// * `url` - request URL (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for any HTTP answer, success or not
    /// * `Err(PluginError::Timeout | PluginError::NetworkError)` when no answer was read
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), PluginError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(provider_name, &e))?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(provider_name, &e)
            } else {
                PluginError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Turn a non-2xx status into [`PluginError::HttpStatus`].
    pub fn ensure_success(
        status_code: u16,
        response_text: &str,
        provider_name: &str,
    ) -> Result<(), PluginError> {
        if is_success(status_code) {
            return Ok(());
        }

        log::error!(
            "[{provider_name}] HTTP {status_code}: {}",
            truncate_for_log(response_text)
        );
        Err(PluginError::HttpStatus {
            provider: provider_name.to_string(),
            status: status_code,
            body: response_text.to_string(),
        })
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(PluginError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, PluginError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            PluginError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Whether the status code is in the 2xx range.
pub fn is_success(status_code: u16) -> bool {
    (200..300).contains(&status_code)
}

fn transport_error(provider_name: &str, e: &reqwest::Error) -> PluginError {
    if e.is_timeout() {
        PluginError::Timeout {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    } else {
        PluginError::NetworkError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    }
}
