//! DNS vendor implementations

/// Shared utilities used by vendor implementations.
pub mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "dnspod")]
mod dnspod;

#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareVendor;
#[cfg(feature = "dnspod")]
pub use dnspod::DnspodVendor;
