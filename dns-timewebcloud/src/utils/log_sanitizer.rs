//! Log sanitization utilities
//!
//! Response bodies are capped before they reach a log line, and the API key
//! is only ever printed in masked form.

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible.
const SECRET_VISIBLE_PREFIX: usize = 4;

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged. Longer ones are cut on a
/// char boundary and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }

    let mut end = TRUNCATE_LIMIT;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

/// Mask a secret, keeping only a short prefix.
///
/// Secrets too short to keep a prefix are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(SECRET_VISIBLE_PREFIX).collect();
    if secret.chars().count() <= SECRET_VISIBLE_PREFIX * 2 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
