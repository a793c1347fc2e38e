//! DNS-01 naming helpers (RFC 8555 §8.4).

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Label prepended to the domain to form the challenge record owner.
pub const CHALLENGE_LABEL: &str = "_acme-challenge.";

/// Append the root dot if missing. The empty string stays empty.
pub fn to_fqdn(name: &str) -> String {
    if name.is_empty() || name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Strip trailing root dots.
pub fn un_fqdn(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// `_acme-challenge.<domain>`
pub fn txt_record_name(domain: &str) -> String {
    format!("{CHALLENGE_LABEL}{domain}")
}

/// Inverse of [`txt_record_name`], returned in canonical form.
pub fn fqdn_from_txt_record_name(name: &str) -> String {
    to_fqdn(name.strip_prefix(CHALLENGE_LABEL).unwrap_or(name))
}

/// Owner name of `txt_fqdn` relative to `zone`, without trailing dot.
///
/// `("_acme-challenge.www.example.com.", "example.com.")` gives `_acme-challenge.www`;
/// a name equal to the zone gives the empty string. Names outside the zone are
/// returned unchanged apart from the trailing dot.
pub fn relative_record_name(txt_fqdn: &str, zone: &str) -> String {
    let name = un_fqdn(txt_fqdn);
    let zone = un_fqdn(zone);
    if name.eq_ignore_ascii_case(zone) {
        return String::new();
    }
    let cut = name.len().saturating_sub(zone.len() + 1);
    match (name.get(..cut), name.get(cut..)) {
        (Some(rel), Some(suffix))
            if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(zone) =>
        {
            rel.to_string()
        }
        _ => name.to_string(),
    }
}

/// TXT value for a key authorization: base64url(SHA-256(key_auth)) without padding.
pub fn encode_key_authorization(key_auth: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(key_auth.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fqdn_round_trip() {
        assert_eq!(to_fqdn("example.com"), "example.com.");
        assert_eq!(to_fqdn("example.com."), "example.com.");
        assert_eq!(to_fqdn(""), "");
        assert_eq!(un_fqdn("example.com."), "example.com");
        assert_eq!(un_fqdn("example.com"), "example.com");
    }

    #[test]
    fn challenge_names() {
        assert_eq!(
            txt_record_name("www.example.com."),
            "_acme-challenge.www.example.com."
        );
        assert_eq!(
            fqdn_from_txt_record_name("_acme-challenge.www.example.com."),
            "www.example.com."
        );
        assert_eq!(
            fqdn_from_txt_record_name("_acme-challenge.www.example.com"),
            "www.example.com."
        );
        assert_eq!(fqdn_from_txt_record_name("www.example.com"), "www.example.com.");
    }

    #[test]
    fn relative_names() {
        assert_eq!(
            relative_record_name("_acme-challenge.www.example.com.", "example.com."),
            "_acme-challenge.www"
        );
        assert_eq!(
            relative_record_name("_acme-challenge.example.com.", "example.com."),
            "_acme-challenge"
        );
        assert_eq!(relative_record_name("example.com.", "example.com."), "");
        assert_eq!(
            relative_record_name("_acme-challenge.WWW.Example.COM.", "example.com."),
            "_acme-challenge.WWW"
        );
    }

    #[test]
    fn relative_name_respects_label_boundary() {
        assert_eq!(
            relative_record_name("_acme-challenge.myexample.com.", "example.com."),
            "_acme-challenge.myexample.com"
        );
    }

    #[test]
    fn key_authorization_digest() {
        // base64url(sha256("token.thumbprint"))
        let encoded = encode_key_authorization("token.thumbprint");
        assert_eq!(encoded.len(), 43);
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+') && !encoded.contains('/'));
        assert_eq!(
            encode_key_authorization(""),
            "47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU"
        );
    }
}
