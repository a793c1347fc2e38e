//! Cloudflare live tests
//!
//! Run with:
//! ```bash
//! CLOUDFLARE_API_TOKEN=xxx TEST_DOMAIN=example.com \
//!     cargo test -p acme-dns-proxy-provider --test cloudflare_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use acme_dns_proxy_provider::{ProviderCredentials, ProviderError, TxtRecord, create_vendor};
use common::TestContext;

#[tokio::test]
#[ignore]
async fn test_cloudflare_append_then_delete() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_DOMAIN");

    let ctx = TestContext::cloudflare().expect("failed to build test context");
    let record = TestContext::test_record(60);

    let record_id = ctx
        .vendor
        .append_record(&ctx.zone, &record)
        .await
        .expect("append_record failed");
    assert!(!record_id.is_empty());

    ctx.vendor
        .delete_record(&ctx.zone, &record_id)
        .await
        .expect("delete_record failed");

    println!("✓ append/delete {} ({record_id})", record.name);
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_apex_challenge_record() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_DOMAIN");

    let ctx = TestContext::cloudflare().expect("failed to build test context");
    let record = TxtRecord::challenge("_acme-challenge", format!("apex-{}", uuid::Uuid::new_v4()));

    let record_id = ctx
        .vendor
        .append_record(&ctx.zone, &record)
        .await
        .expect("append_record failed");
    ctx.vendor
        .delete_record(&ctx.zone, &record_id)
        .await
        .expect("delete_record failed");
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_unknown_zone() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_DOMAIN");

    let ctx = TestContext::cloudflare().expect("failed to build test context");
    let result = ctx
        .vendor
        .append_record(
            "nonexistent-zone-for-acme-dns-proxy.invalid.",
            &TestContext::test_record(60),
        )
        .await;
    assert!(
        matches!(result, Err(ProviderError::DomainNotFound { .. })),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_bad_token() {
    skip_if_no_credentials!("TEST_DOMAIN");

    let vendor = create_vendor(ProviderCredentials::Cloudflare {
        api_token: "definitely-not-a-token".to_string(),
    })
    .expect("vendor construction should not touch the network");
    let zone = format!("{}.", std::env::var("TEST_DOMAIN").unwrap_or_default());

    let result = vendor
        .append_record(&zone, &TestContext::test_record(60))
        .await;
    assert!(
        matches!(
            result,
            Err(ProviderError::InvalidCredentials { .. } | ProviderError::PermissionDenied { .. })
        ),
        "unexpected result: {result:?}"
    );
}
