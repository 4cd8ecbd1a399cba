//! Timeweb Cloud DNS-01 authenticator
//!
//! Fulfils the host's perform/cleanup callbacks with [`TimewebClient`] and
//! remembers which records each challenge created, so the host never has to
//! carry provider record ids around.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{PluginError, Result};
use crate::providers::common::normalize_domain_name;
use crate::providers::{AccountStatusResponse, ClientConfig, PROVIDER_NAME, TimewebClient};
use crate::traits::{CredentialLoader, Dns01Authenticator};
use crate::types::{ChallengeKey, PluginMetadata, PluginOption, RecordId, TimewebCredentials};

/// Plugin identifier.
pub const PLUGIN_NAME: &str = "dns-timewebcloud";
/// Option naming the credentials file.
pub const CREDENTIALS_OPTION: &str = "credentials";
/// Propagation wait the host should apply, in seconds.
pub const DEFAULT_PROPAGATION_SECONDS: u64 = 10;
/// TTL hint for challenge records, in seconds.
pub const RECORD_TTL: u32 = 300;

const DESCRIPTION: &str = "Obtain certificates using a DNS TXT record (if you are using \
                           Timeweb Cloud infrastructure for DNS).";
const MORE_INFO: &str = "This plugin configures a DNS TXT record to respond to a DNS-01 \
                         challenge using the Timeweb Cloud API.";

/// DNS-01 authenticator for Timeweb Cloud.
///
/// Owns the pending-cleanup map: each challenge key maps to the ids of the
/// records created for it and not yet deleted.
#[derive(Debug, Default)]
pub struct TimewebAuthenticator {
    credentials: Option<TimewebCredentials>,
    client: Option<TimewebClient>,
    for_cleanup: HashMap<ChallengeKey, Vec<RecordId>>,
}

impl TimewebAuthenticator {
    /// Authenticator without credentials; call
    /// [`setup_credentials`](Self::setup_credentials) before `perform`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: TimewebCredentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::default()
        }
    }

    /// Option the host must expose for the credentials file.
    pub fn credentials_option() -> PluginOption {
        PluginOption {
            name: CREDENTIALS_OPTION.to_string(),
            help: "Timeweb Cloud credentials INI file.".to_string(),
        }
    }

    /// Load credentials through the host's loader.
    ///
    /// Replaces any previous credentials and drops the cached session.
    pub fn setup_credentials(&mut self, loader: &dyn CredentialLoader) -> Result<()> {
        let map =
            loader.load_credentials(&Self::credentials_option(), &TimewebCredentials::fields())?;
        let credentials = TimewebCredentials::from_map(&map)?;
        log::debug!("[{PROVIDER_NAME}] Credentials loaded: {credentials:?}");

        self.credentials = Some(credentials);
        self.client = None;
        Ok(())
    }

    /// Record ids still awaiting cleanup for a challenge.
    pub fn pending_records(&self, domain: &str, validation_name: &str) -> Option<&[RecordId]> {
        self.for_cleanup
            .get(&ChallengeKey::new(validation_name, domain))
            .map(Vec::as_slice)
    }

    /// The whole pending-cleanup map.
    pub fn pending_cleanup(&self) -> &HashMap<ChallengeKey, Vec<RecordId>> {
        &self.for_cleanup
    }

    /// Session built from the current credentials, created on first use.
    fn client(&mut self) -> Result<TimewebClient> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| PluginError::Configuration {
                detail: "Timeweb Cloud credentials are not loaded".to_string(),
            })?;

        let mut config = ClientConfig::default();
        if let Some(url) = &credentials.api_url {
            config = config.with_base_url(url.clone());
        }
        let client = TimewebClient::with_config(&credentials.api_key, config)?;
        self.client = Some(client.clone());
        Ok(client)
    }
}

/// Reject accounts the API reports as blocked, or whose status is unreadable.
fn ensure_account_usable(response: &AccountStatusResponse) -> Result<()> {
    let status = response
        .status
        .as_ref()
        .ok_or_else(|| PluginError::MissingField {
            provider: PROVIDER_NAME.to_string(),
            field: "status".to_string(),
        })?;

    let is_blocked = status.is_blocked.ok_or_else(|| PluginError::MissingField {
        provider: PROVIDER_NAME.to_string(),
        field: "status.is_blocked".to_string(),
    })?;

    if is_blocked {
        return Err(PluginError::AccountBlocked {
            provider: PROVIDER_NAME.to_string(),
        });
    }
    Ok(())
}

fn log_failure(context: &str, e: &PluginError) {
    if e.is_expected() {
        log::warn!("[{PROVIDER_NAME}] {context}: {e}");
    } else {
        log::error!("[{PROVIDER_NAME}] {context}: {e}");
    }
}

#[async_trait]
impl Dns01Authenticator for TimewebAuthenticator {
    fn metadata() -> PluginMetadata {
        PluginMetadata {
            name: PLUGIN_NAME.to_string(),
            description: DESCRIPTION.to_string(),
            more_info: MORE_INFO.to_string(),
            default_propagation_seconds: DEFAULT_PROPAGATION_SECONDS,
            ttl: RECORD_TTL,
            options: vec![Self::credentials_option()],
            credential_fields: TimewebCredentials::fields(),
        }
    }

    async fn perform(
        &mut self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> Result<()> {
        let client = self.client()?;

        let response = client.check_token().await?;
        ensure_account_usable(&response).inspect_err(|e| log_failure("Token check failed", e))?;

        let key = ChallengeKey::new(validation_name, domain);
        let record_id = client
            .create_acme_record(domain, validation, normalize_domain_name(validation_name))
            .await?;

        self.for_cleanup.entry(key).or_default().push(record_id);
        Ok(())
    }

    async fn cleanup(
        &mut self,
        domain: &str,
        validation_name: &str,
        _validation: &str,
    ) -> Result<()> {
        let key = ChallengeKey::new(validation_name, domain);
        let Some(record_ids) = self.for_cleanup.remove(&key) else {
            log::debug!("[{PROVIDER_NAME}] Nothing to clean up for {key}");
            return Ok(());
        };

        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                self.for_cleanup.insert(key, record_ids);
                return Err(e);
            }
        };

        // Ids whose deletion failed go back into the map so a later cleanup can retry them.
        let mut failed = Vec::new();
        let mut first_error = None;
        for record_id in record_ids {
            if let Err(e) = client.delete_acme_record(domain, record_id).await {
                log_failure(&format!("Failed to delete DNS record {record_id}"), &e);
                failed.push(record_id);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => {
                self.for_cleanup.insert(key, failed);
                Err(e)
            }
            None => Ok(()),
        }
    }
}
