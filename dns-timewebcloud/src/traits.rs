use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CredentialField, PluginMetadata, PluginOption};

/// DNS-01 认证器 Trait
///
/// The callback contract a certificate-issuance host drives. The host calls
/// [`perform`](Self::perform) to publish a challenge and, once validation is
/// over, [`cleanup`](Self::cleanup) with the same arguments. Calls are
/// expected to be sequential; both take `&mut self`.
#[async_trait]
pub trait Dns01Authenticator: Send {
    /// Static description, declared options and credential keys.
    ///
    /// Callable before an instance exists.
    fn metadata() -> PluginMetadata
    where
        Self: Sized;

    /// Publish the TXT record for one challenge.
    ///
    /// # Arguments
    /// * `domain` - base domain being validated
    /// * `validation_name` - fully-qualified record name (may end with `.`)
    /// * `validation` - value to publish
    async fn perform(&mut self, domain: &str, validation_name: &str, validation: &str)
    -> Result<()>;

    /// Remove every record published by `perform` for the same arguments.
    ///
    /// Unknown challenges are a no-op.
    async fn cleanup(&mut self, domain: &str, validation_name: &str, validation: &str)
    -> Result<()>;
}

/// 凭证加载 Trait
///
/// Implemented by the host's credential-loading facility. The authenticator
/// passes the option naming the credentials file and the keys it expects; the
/// host locates, reads and parses the file and returns its key-value pairs.
pub trait CredentialLoader {
    fn load_credentials(
        &self,
        option: &PluginOption,
        fields: &[CredentialField],
    ) -> Result<HashMap<String, String>>;
}

/// A ready-made map acts as its own loader; handy for embedding and tests.
impl CredentialLoader for HashMap<String, String> {
    fn load_credentials(
        &self,
        _option: &PluginOption,
        _fields: &[CredentialField],
    ) -> Result<HashMap<String, String>> {
        Ok(self.clone())
    }
}
