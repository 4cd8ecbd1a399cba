//! Provider 公共工具函数

use crate::error::{PluginError, Result};

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Split a fully-qualified record name into the part relative to `domain`.
///
/// 如: "_acme-challenge.www.example.com" + "example.com" -> "_acme-challenge.www"
/// 如: "example.com" + "example.com" -> ""
///
/// Trailing dots on either argument are ignored. A record name with fewer
/// labels than the domain, or one that does not end with the domain's labels,
/// is rejected rather than sliced.
pub fn extract_subdomain(record_name: &str, domain: &str, provider: &str) -> Result<String> {
    let record = normalize_domain_name(record_name);
    let zone = normalize_domain_name(domain);

    let invalid = |detail: String| PluginError::InvalidParameter {
        provider: provider.to_string(),
        param: "record_name".to_string(),
        detail,
    };

    if zone.is_empty() {
        return Err(PluginError::InvalidParameter {
            provider: provider.to_string(),
            param: "domain".to_string(),
            detail: "domain must not be empty".to_string(),
        });
    }

    let record_labels: Vec<&str> = record.split('.').collect();
    let zone_labels: Vec<&str> = zone.split('.').collect();

    let Some(split_at) = record_labels.len().checked_sub(zone_labels.len()) else {
        return Err(invalid(format!(
            "'{record_name}' has fewer labels than domain '{domain}'"
        )));
    };

    let (subdomain, suffix) = record_labels.split_at(split_at);
    let suffix_matches = suffix
        .iter()
        .zip(&zone_labels)
        .all(|(a, b)| a.eq_ignore_ascii_case(b));
    if !suffix_matches {
        return Err(invalid(format!(
            "'{record_name}' is not inside domain '{domain}'"
        )));
    }

    Ok(subdomain.join("."))
}
