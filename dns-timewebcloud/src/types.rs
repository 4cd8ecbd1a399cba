use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::mask_secret;

/// Identifier the provider assigns to a created DNS record.
pub type RecordId = u64;

// ============ Challenge Types ============

/// Key grouping the records created for one challenge.
///
/// Holds both parts separately, so `("example.", "le.com")` and
/// `("example.le.", "com")` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChallengeKey {
    /// Fully-qualified challenge record name, as given by the host.
    pub validation_name: String,
    /// Base domain the challenge belongs to.
    pub domain: String,
}

impl ChallengeKey {
    pub fn new(validation_name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            validation_name: validation_name.into(),
            domain: domain.into(),
        }
    }
}

impl fmt::Display for ChallengeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.validation_name, self.domain)
    }
}

// ============ Plugin Metadata Types ============

/// The input type of a credential field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text value.
    Text,
    /// Secret value, never echoed back.
    Password,
}

/// Definition of a single key expected inside the credentials file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialField {
    /// Key inside the credentials file (e.g., `"api_key"`).
    pub key: String,
    /// Human-readable description shown when the key is missing.
    pub label: String,
    /// Input type of the value.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether loading must fail when the key is absent.
    pub required: bool,
}

/// A configuration option the authenticator declares to its host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOption {
    /// Option name without any host-specific prefix (e.g., `"credentials"`).
    pub name: String,
    /// Help text for the option.
    pub help: String,
}

/// Static description of the authenticator, consumed by the host framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    /// Plugin identifier.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Extended help text.
    pub more_info: String,
    /// How long the host should wait for DNS propagation. Informational only.
    pub default_propagation_seconds: u64,
    /// TTL hint for challenge records, in seconds.
    pub ttl: u32,
    /// Options the host should expose.
    pub options: Vec<PluginOption>,
    /// Keys expected inside the credentials file.
    pub credential_fields: Vec<CredentialField>,
}

// ============ Credential Types ============

/// Validation error for the credentials loaded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field, label } => {
                write!(f, "Missing required field '{field}': {label}")
            }
            Self::EmptyField { field, label } => {
                write!(f, "Field '{field}' must not be empty: {label}")
            }
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Credentials for the Timeweb Cloud API.
#[derive(Clone, Serialize, Deserialize)]
pub struct TimewebCredentials {
    /// Timeweb Cloud API key, sent as a bearer token.
    pub api_key: String,
    /// Alternative API endpoint, for testing against non-production servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl TimewebCredentials {
    pub const API_KEY: &'static str = "api_key";
    pub const API_URL: &'static str = "api_url";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: None,
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Keys this plugin reads from the credentials file.
    pub fn fields() -> Vec<CredentialField> {
        vec![
            CredentialField {
                key: Self::API_KEY.to_string(),
                label: "Timeweb Cloud API key".to_string(),
                field_type: FieldType::Password,
                required: true,
            },
            CredentialField {
                key: Self::API_URL.to_string(),
                label: "Timeweb Cloud API URL (testing only)".to_string(),
                field_type: FieldType::Text,
                required: false,
            },
        ]
    }

    /// Build credentials from the flat key-value map produced by the host's
    /// credentials loader.
    ///
    /// A blank optional `api_url` is treated as absent.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        let api_key = get_required_field(map, Self::API_KEY, "Timeweb Cloud API key")?;
        let api_url = map
            .get(Self::API_URL)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(ToString::to_string);

        Ok(Self { api_key, api_url })
    }

    /// Convert credentials back to a flat key-value map.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map: HashMap<String, String> =
            [(Self::API_KEY.to_string(), self.api_key.clone())].into();
        if let Some(url) = &self.api_url {
            map.insert(Self::API_URL.to_string(), url.clone());
        }
        map
    }
}

impl fmt::Debug for TimewebCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimewebCredentials")
            .field("api_key", &mask_secret(&self.api_key))
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Obtain a required field from the map and verify that it is not blank.
fn get_required_field(
    map: &HashMap<String, String>,
    key: &str,
    label: &str,
) -> Result<String, CredentialValidationError> {
    match map.get(key) {
        None => Err(CredentialValidationError::MissingField {
            field: key.to_string(),
            label: label.to_string(),
        }),
        Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
            field: key.to_string(),
            label: label.to_string(),
        }),
        Some(v) => Ok(v.trim().to_string()),
    }
}
