//! Vendor factory.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::DnsVendor;
use crate::types::ProviderCredentials;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareVendor;
#[cfg(feature = "dnspod")]
use crate::providers::DnspodVendor;

/// Creates a [`DnsVendor`] instance from the given credentials.
///
/// The concrete vendor is determined by the [`ProviderCredentials`] variant.
/// The result is wrapped in `Arc<dyn DnsVendor>` so it can be shared by
/// concurrent request handlers.
///
/// # Examples
///
/// ```rust,no_run
/// use acme_dns_proxy_provider::{create_vendor, ProviderCredentials};
///
/// let vendor = create_vendor(ProviderCredentials::Cloudflare {
///     api_token: "your-token".to_string(),
/// }).unwrap();
/// assert_eq!(vendor.id(), "cloudflare");
/// ```
pub fn create_vendor(credentials: ProviderCredentials) -> Result<Arc<dyn DnsVendor>> {
    match credentials {
        #[cfg(feature = "cloudflare")]
        ProviderCredentials::Cloudflare { api_token } => {
            Ok(Arc::new(CloudflareVendor::new(api_token)?))
        }
        #[cfg(feature = "dnspod")]
        ProviderCredentials::Dnspod {
            secret_id,
            secret_key,
        } => Ok(Arc::new(DnspodVendor::new(secret_id, secret_key)?)),
    }
}
