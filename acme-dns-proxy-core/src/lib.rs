//! ACME DNS-01 Proxy Core Library
//!
//! Decides whether a caller may publish a DNS-01 challenge for a domain, and
//! relays permitted requests to the configured DNS vendor:
//! - Glob-pattern access control list with per-rule bearer tokens
//! - Authoritative zone discovery by SOA walk
//! - Present/cleanup dispatch with record-id correlation
//!
//! Transport, configuration loading and logging setup live in the binary crate;
//! this crate only depends on the `log` facade.

pub mod acl;
pub mod dns01;
pub mod error;
pub mod gateway;
pub mod pattern;
pub mod pending;
pub mod proxy;
pub mod types;
pub mod zone;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use acl::{AccessControlList, AccessRule, RuleConfig};
pub use error::{CoreError, CoreResult};
pub use gateway::ProviderGateway;
pub use pattern::Pattern;
pub use pending::{PendingRecord, PendingRecordStore};
pub use proxy::{AuthorizingProxy, LogRequestSink, RequestInfo, RequestSink};
pub use types::{Action, Challenge, Remote, Request};
pub use zone::{HickorySoaLookup, SoaLookup, SoaZoneResolver, ZoneResolver};
