//! Timeweb Cloud ACME record operations

use crate::error::{PluginError, Result};
use crate::http_client::{HttpUtils, is_success};
use crate::providers::common::{extract_subdomain, normalize_domain_name};
use crate::types::RecordId;

use super::types::{CreateRecordBody, CreateRecordResponse};
use super::{AccountStatusResponse, PROVIDER_NAME, TimewebClient};

const TXT_RECORD_TYPE: &str = "TXT";

/// Path of a domain's DNS records collection.
fn records_path(domain: &str) -> String {
    format!(
        "/api/v1/domains/{}/dns-records",
        urlencoding::encode(normalize_domain_name(domain))
    )
}

impl TimewebClient {
    /// Verify the API key by requesting the account status.
    pub async fn check_token(&self) -> Result<AccountStatusResponse> {
        self.get_json("/api/v1/account/status").await
    }

    /// Create the TXT record for a DNS-01 challenge.
    ///
    /// # Arguments
    /// * `domain` - the base domain (zone) managed in Timeweb Cloud
    /// * `token` - validation string to publish
    /// * `record_name` - fully-qualified record name, e.g. `_acme-challenge.www.example.com`
    ///
    /// # Returns
    /// The provider's identifier of the new record.
    pub async fn create_acme_record(
        &self,
        domain: &str,
        token: &str,
        record_name: &str,
    ) -> Result<RecordId> {
        let subdomain = extract_subdomain(record_name, domain, PROVIDER_NAME)?;
        let body = CreateRecordBody {
            subdomain: &subdomain,
            record_type: TXT_RECORD_TYPE,
            value: token,
        };

        let (status, text) = self.post(&records_path(domain), &body).await?;
        HttpUtils::ensure_success(status, &text, PROVIDER_NAME)?;

        let record_id = parse_created_record_id(&text).inspect_err(|e| {
            log::warn!(
                "[{PROVIDER_NAME}] API accepted TXT record '{subdomain}' for domain {domain} \
                 (HTTP {status}) but its id is unreadable ({e}); \
                 the record may need to be removed manually"
            );
        })?;

        log::info!(
            "Created ACME DNS-01 challenge DNS record {record_id} for domain {domain}"
        );
        Ok(record_id)
    }

    /// Remove a record created by [`create_acme_record`](Self::create_acme_record).
    ///
    /// A record that no longer exists (HTTP 404) counts as removed.
    pub async fn delete_acme_record(&self, domain: &str, record_id: RecordId) -> Result<()> {
        let path = format!("{}/{record_id}", records_path(domain));
        let (status, text) = self.delete(&path).await?;

        if status == 404 {
            log::warn!(
                "Failed to delete DNS record {record_id} for domain {domain} - not exist"
            );
            return Ok(());
        }
        if is_success(status) {
            log::info!("DNS record {record_id} deleted for domain {domain}");
            return Ok(());
        }

        HttpUtils::ensure_success(status, &text, PROVIDER_NAME)
    }
}

fn parse_created_record_id(text: &str) -> Result<RecordId> {
    let response: CreateRecordResponse = HttpUtils::parse_json(text, PROVIDER_NAME)?;
    response
        .dns_record
        .and_then(|record| record.id)
        .ok_or_else(|| PluginError::MissingField {
            provider: PROVIDER_NAME.to_string(),
            field: "dns_record.id".to_string(),
        })
}
