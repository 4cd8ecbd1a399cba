//! Timeweb Cloud API 类型定义

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::RecordId;

/// Body of `GET /api/v1/account/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStatusResponse {
    pub status: Option<AccountStatus>,
}

/// Account status block. Fields this plugin does not use are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStatus {
    pub is_blocked: Option<bool>,
    pub is_permanent_blocked: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/v1/domains/{domain}/dns-records`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordBody<'a> {
    pub subdomain: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub value: &'a str,
}

/// Response of record creation; only the id is read.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateRecordResponse {
    pub dns_record: Option<CreatedDnsRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedDnsRecord {
    pub id: Option<RecordId>,
}
