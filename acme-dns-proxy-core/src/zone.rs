//! Authoritative zone discovery.
//!
//! The zone of an FQDN is the closest enclosing name that owns an SOA record.
//! [`SoaZoneResolver`] finds it by querying each label suffix in turn, from the
//! full name towards the root.

use std::net::SocketAddr;

use async_trait::async_trait;
use hickory_resolver::{
    ResolveError, TokioResolver,
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::rr::{Name, Record, RecordType},
};

use crate::dns01::to_fqdn;
use crate::error::{CoreError, CoreResult};

/// Maps an FQDN to its authoritative zone (canonical, trailing dot).
#[async_trait]
pub trait ZoneResolver: Send + Sync {
    async fn resolve_zone(&self, fqdn: &str) -> CoreResult<String>;
}

/// A single SOA query.
#[async_trait]
pub trait SoaLookup: Send + Sync {
    /// Whether the answer for `name` contains an SOA record owned by exactly `name`.
    ///
    /// NXDOMAIN and empty answers are `Ok(false)`; transport failures are `Err`.
    async fn has_soa(&self, name: &str) -> CoreResult<bool>;
}

// ============ SOA walk ============

/// Walks label suffixes of the FQDN until one owns an SOA record.
pub struct SoaZoneResolver<L> {
    lookup: L,
}

impl<L: SoaLookup> SoaZoneResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }
}

/// `a.b.c.` -> `["a.b.c.", "b.c.", "c."]`
fn label_suffixes(fqdn: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(fqdn);
    std::iter::from_fn(move || {
        let current = rest.filter(|s| !s.is_empty() && *s != ".")?;
        rest = current.split_once('.').map(|(_, tail)| tail);
        Some(current)
    })
}

#[async_trait]
impl<L: SoaLookup> ZoneResolver for SoaZoneResolver<L> {
    async fn resolve_zone(&self, fqdn: &str) -> CoreResult<String> {
        let fqdn = to_fqdn(fqdn);
        let mut last_error = None;

        for candidate in label_suffixes(&fqdn) {
            match self.lookup.has_soa(candidate).await {
                Ok(true) => {
                    log::debug!("zone for {fqdn} is {candidate}");
                    return Ok(candidate.to_string());
                }
                Ok(false) => {}
                Err(e) => {
                    log::warn!("SOA lookup for {candidate} failed: {e}");
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(CoreError::ZoneResolution {
            detail: last_error.unwrap_or_else(|| "no SOA record found".to_string()),
            fqdn,
        })
    }
}

// ============ hickory backend ============

/// SOA lookups through a recursive resolver.
pub struct HickorySoaLookup {
    resolver: TokioResolver,
}

impl HickorySoaLookup {
    /// Use `nameservers` if given, otherwise the host system configuration
    /// (falling back to hickory's default upstreams if that cannot be read).
    pub fn new(nameservers: &[SocketAddr]) -> Self {
        let resolver = if nameservers.is_empty() {
            build_system_resolver()
        } else {
            let mut group = NameServerConfigGroup::with_capacity(nameservers.len() * 2);
            for addr in nameservers {
                group.merge(NameServerConfigGroup::from_ips_clear(
                    &[addr.ip()],
                    addr.port(),
                    true,
                ));
            }
            let config = ResolverConfig::from_parts(None, vec![], group);
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(ResolverOpts::default())
                .build()
        };
        Self { resolver }
    }
}

fn build_system_resolver() -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(builder) => return builder.build(),
            Err(e) => {
                log::warn!("Failed to load system DNS configuration, falling back to defaults: {e}");
            }
        }
    }

    TokioResolver::builder_with_config(
        ResolverConfig::default(),
        TokioConnectionProvider::default(),
    )
    .with_options(ResolverOpts::default())
    .build()
}

#[async_trait]
impl SoaLookup for HickorySoaLookup {
    async fn has_soa(&self, name: &str) -> CoreResult<bool> {
        let owner = Name::from_ascii(name).map_err(|e| CoreError::ZoneResolution {
            fqdn: name.to_string(),
            detail: e.to_string(),
        })?;

        match self.resolver.lookup(owner.clone(), RecordType::SOA).await {
            Ok(answer) => Ok(owns_soa(&owner, answer.record_iter())),
            Err(e) => negative_answer(name, &e),
        }
    }
}

/// An SOA reached through a CNAME belongs to the alias target, not to `owner`.
fn owns_soa<'a>(owner: &Name, records: impl IntoIterator<Item = &'a Record>) -> bool {
    records
        .into_iter()
        .any(|r| r.record_type() == RecordType::SOA && r.name() == owner)
}

/// NXDOMAIN and empty answers mean "not a zone apex"; anything else is a failure.
fn negative_answer(name: &str, e: &ResolveError) -> CoreResult<bool> {
    if e.is_no_records_found() || e.is_nx_domain() {
        return Ok(false);
    }
    Err(CoreError::ZoneResolution {
        fqdn: name.to_string(),
        detail: e.to_string(),
    })
}
