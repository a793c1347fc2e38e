//! Helpers shared by vendor implementations

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;

use crate::error::{ProviderError, Result};

type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the HTTP client every vendor uses, with connect and request timeouts.
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("failed to build HTTP client: {e}"),
        })
}

// ============ HMAC-SHA256 ============

/// HMAC-SHA256 (used by request signing).
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        unreachable!("HMAC accepts keys of any length")
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

// ============ Names ============

/// Strip the trailing root dot.
pub fn normalize_domain_name(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Record name as the vendor expects it: empty or `@` means the zone apex.
pub fn relative_or_apex(name: &str) -> &str {
    let name = normalize_domain_name(name);
    if name.is_empty() { "@" } else { name }
}

/// Turn a zone-relative name into a fully qualified one without trailing dot.
/// `"www"` + `"example.com."` -> `"www.example.com"`, `"@"` -> `"example.com"`.
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    match relative_or_apex(relative_name) {
        "@" => zone.to_string(),
        rel => format!("{rel}.{zone}"),
    }
}
