//! # dns-timewebcloud
//!
//! ACME DNS-01 authenticator for domains hosted on
//! [Timeweb Cloud](https://timeweb.cloud/) DNS.
//!
//! The crate has two parts:
//!
//! - [`TimewebClient`] — a small client for the three API calls the challenge
//!   needs: account status (token check), TXT record creation and deletion.
//! - [`TimewebAuthenticator`] — implements [`Dns01Authenticator`], the
//!   perform/cleanup callback pair a certificate-issuance host drives, and
//!   remembers which records belong to which challenge.
//!
//! DNS propagation, retries and credential-file parsing stay with the host.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//!
//! use dns_timewebcloud::{Dns01Authenticator, TimewebAuthenticator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Normally produced by the host's credentials loader.
//!     let credentials: HashMap<String, String> =
//!         [("api_key".to_string(), "your-api-key".to_string())].into();
//!
//!     let mut authenticator = TimewebAuthenticator::new();
//!     authenticator.setup_credentials(&credentials)?;
//!
//!     authenticator
//!         .perform("example.com", "_acme-challenge.example.com.", "token-value")
//!         .await?;
//!     // ... the host waits for propagation and lets the CA validate ...
//!     authenticator
//!         .cleanup("example.com", "_acme-challenge.example.com.", "token-value")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, PluginError>`](PluginError):
//!
//! - [`PluginError::HttpStatus`] — the API answered with a non-2xx status
//! - [`PluginError::MissingField`] / [`PluginError::ParseError`] — unexpected response body
//! - [`PluginError::AccountBlocked`] — the account behind the key is blocked
//!
//! A record that is already gone when cleanup deletes it is not an error.

mod authenticator;
mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{PluginError, Result};

pub use authenticator::{
    CREDENTIALS_OPTION, DEFAULT_PROPAGATION_SECONDS, PLUGIN_NAME, RECORD_TTL, TimewebAuthenticator,
};

pub use traits::{CredentialLoader, Dns01Authenticator};

pub use types::{
    ChallengeKey, CredentialField, CredentialValidationError, FieldType, PluginMetadata,
    PluginOption, RecordId, TimewebCredentials,
};

pub use providers::common::extract_subdomain;
pub use providers::{AccountStatus, AccountStatusResponse, ClientConfig, TimewebClient};
