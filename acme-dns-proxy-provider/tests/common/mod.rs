//! Shared helpers for live vendor tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use acme_dns_proxy_provider::{DnsVendor, ProviderCredentials, TxtRecord, create_vendor};

/// Return early when a required environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: {} is not set", $var);
                return;
            }
        )+
    };
}

/// Unique challenge-style record name so parallel runs never collide.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_acme-challenge._test-{}", &uuid.to_string()[..8])
}

/// A vendor plus the zone (canonical, with trailing dot) the tests may write into.
pub struct TestContext {
    pub vendor: Arc<dyn DnsVendor>,
    pub zone: String,
}

impl TestContext {
    pub fn cloudflare() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        Self::with(ProviderCredentials::Cloudflare { api_token })
    }

    pub fn dnspod() -> Option<Self> {
        let secret_id = env::var("DNSPOD_SECRET_ID").ok()?;
        let secret_key = env::var("DNSPOD_SECRET_KEY").ok()?;
        Self::with(ProviderCredentials::Dnspod {
            secret_id,
            secret_key,
        })
    }

    fn with(credentials: ProviderCredentials) -> Option<Self> {
        let zone = env::var("TEST_DOMAIN").ok()?;
        let vendor = create_vendor(credentials).ok()?;
        Some(Self {
            vendor,
            zone: format!("{}.", zone.trim_end_matches('.')),
        })
    }

    /// A challenge record with the given TTL (DNSPod free plans reject TTLs below 600).
    pub fn test_record(ttl: u32) -> TxtRecord {
        TxtRecord {
            name: generate_test_record_name(),
            value: format!("integration-{}", uuid::Uuid::new_v4()),
            ttl,
        }
    }
}
