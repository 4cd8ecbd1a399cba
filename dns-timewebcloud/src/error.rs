use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CredentialValidationError;

/// Unified error type for the Timeweb Cloud authenticator.
///
/// Each variant carrying a `provider` field names the API that produced it, so
/// messages read the same way whether they come from the client or the
/// controller.
///
/// # Error families
///
/// - transport: [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout)
/// - HTTP: [`HttpStatus`](Self::HttpStatus)
/// - response shape: [`ParseError`](Self::ParseError), [`MissingField`](Self::MissingField)
/// - account policy: [`AccountBlocked`](Self::AccountBlocked)
/// - configuration: [`Configuration`](Self::Configuration),
///   [`InvalidCredentials`](Self::InvalidCredentials),
///   [`InvalidParameter`](Self::InvalidParameter),
///   [`CredentialValidation`](Self::CredentialValidation)
///
/// Nothing is retried. Every error is handed straight back to the host framework.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum PluginError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API answered with a non-success HTTP status.
    #[error("[{provider}] HTTP {status}: {body}")]
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body is not valid JSON or does not have the expected shape.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A field the authenticator relies on is absent from an otherwise valid response.
    #[error("[{provider}] Invalid API response: missing '{field}' in response body")]
    MissingField {
        /// Provider that produced the error.
        provider: String,
        /// Dotted path of the missing field (e.g. `dns_record.id`).
        field: String,
    },

    /// The account behind the API key is blocked.
    #[error("[{provider}] Account is blocked")]
    AccountBlocked {
        /// Provider that produced the error.
        provider: String,
    },

    /// The API key cannot be used to build an authenticated session.
    #[error("[{provider}] Invalid credentials: {detail}")]
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// An argument supplied by the host framework is unusable.
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The authenticator is not configured (credentials never loaded, bad base URL, ...).
    #[error("Configuration error: {detail}")]
    Configuration {
        /// Error details.
        detail: String,
    },

    /// Credential fields are missing or empty.
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),
}

impl PluginError {
    /// Whether the error means the API answered, but not with what we expected.
    #[must_use]
    pub fn is_response_shape(&self) -> bool {
        matches!(self, Self::ParseError { .. } | Self::MissingField { .. })
    }

    /// 是否为预期行为（用户输入、账户状态等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::AccountBlocked { .. }
                | Self::InvalidCredentials { .. }
                | Self::InvalidParameter { .. }
                | Self::Configuration { .. }
                | Self::CredentialValidation(_)
        )
    }
}

impl From<CredentialValidationError> for PluginError {
    fn from(err: CredentialValidationError) -> Self {
        Self::CredentialValidation(err)
    }
}

/// Convenience type alias for `Result<T, PluginError>`.
pub type Result<T> = std::result::Result<T, PluginError>;
