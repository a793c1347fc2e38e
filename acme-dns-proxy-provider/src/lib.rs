//! # acme-dns-proxy-provider
//!
//! DNS vendor clients that publish and remove the TXT records used by ACME
//! DNS-01 challenges.
//!
//! ## Supported Vendors
//!
//! | Vendor | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token |
//! | [DNSPod (Tencent Cloud)](https://www.dnspod.cn/) | `dnspod` | TC3-HMAC-SHA256 |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: every vendor above.
//! - **`cloudflare`**, **`dnspod`**: a single vendor.
//! - **`native-tls`** *(default)* or **`rustls`**: TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use acme_dns_proxy_provider::{create_vendor, ProviderCredentials, TxtRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let vendor = create_vendor(ProviderCredentials::Cloudflare {
//!         api_token: "your-token".to_string(),
//!     })?;
//!
//!     let record = TxtRecord::challenge("_acme-challenge.www", "digest");
//!     let id = vendor.append_record("example.com.", &record).await?;
//!     vendor.delete_record("example.com.", &id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError). Vendor
//! calls are made exactly once; transient variants (`NetworkError`, `Timeout`,
//! `RateLimited`) are surfaced to the caller rather than retried.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_vendor;

// Internal traits (error mapping) stay private.
pub use traits::DnsVendor;

pub use types::{
    CHALLENGE_TTL, CredentialValidationError, ProviderCredentials, ProviderType, TxtRecord,
    UnknownProviderType,
};

pub use utils::log_sanitizer;

#[cfg(feature = "cloudflare")]
pub use providers::CloudflareVendor;

#[cfg(feature = "dnspod")]
pub use providers::DnspodVendor;
