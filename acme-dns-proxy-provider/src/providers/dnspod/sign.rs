//! Tencent Cloud TC3-HMAC-SHA256 request signing

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;

use super::{DNSPOD_API_HOST, DNSPOD_SERVICE, DnspodVendor};

impl DnspodVendor {
    /// Build the `Authorization` header for a POST of `payload` to `action`.
    ///
    /// Only `content-type`, `host` and `x-tc-action` are signed; the credential
    /// scope date is the UTC date of `timestamp`.
    pub(crate) fn sign(&self, action: &str, payload: &str, timestamp: i64) -> String {
        const ALGORITHM: &str = "TC3-HMAC-SHA256";
        const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

        let date = DateTime::from_timestamp(timestamp, 0)
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%d")
            .to_string();

        let canonical_headers = format!(
            "content-type:application/json; charset=utf-8\nhost:{DNSPOD_API_HOST}\nx-tc-action:{}\n",
            action.to_lowercase()
        );
        let canonical_request = format!(
            "POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
            sha256_hex(payload)
        );

        let credential_scope = format!("{date}/{DNSPOD_SERVICE}/tc3_request");
        let string_to_sign = format!(
            "{ALGORITHM}\n{timestamp}\n{credential_scope}\n{}",
            sha256_hex(&canonical_request)
        );

        let secret_date = hmac_sha256(
            format!("TC3{}", self.secret_key).as_bytes(),
            date.as_bytes(),
        );
        let secret_service = hmac_sha256(&secret_date, DNSPOD_SERVICE.as_bytes());
        let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
        let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

        format!(
            "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.secret_id
        )
    }
}

fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}
