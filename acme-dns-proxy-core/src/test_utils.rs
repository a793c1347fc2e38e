//! Test helpers
//!
//! Mock vendor, static SOA lookup and a recording request sink.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use acme_dns_proxy_provider::{DnsVendor, ProviderError, Result as ProviderResult, TxtRecord};
use async_trait::async_trait;

use crate::acl::{AccessControlList, RuleConfig};
use crate::error::{CoreError, CoreResult};
use crate::gateway::ProviderGateway;
use crate::proxy::{AuthorizingProxy, RequestInfo, RequestSink};
use crate::zone::{SoaLookup, SoaZoneResolver};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ===== MockVendor =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendCall {
    pub zone: String,
    pub record: TxtRecord,
    pub record_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCall {
    pub zone: String,
    pub record_id: String,
}

/// In-memory vendor that hands out sequential record ids.
#[derive(Default)]
pub struct MockVendor {
    next_id: AtomicUsize,
    appended: Mutex<Vec<AppendCall>>,
    deleted: Mutex<Vec<DeleteCall>>,
    append_attempts: AtomicUsize,
    delete_attempts: AtomicUsize,
    /// Returned by the next append instead of succeeding
    append_error: Mutex<Option<ProviderError>>,
    /// Returned by the next delete instead of succeeding
    delete_error: Mutex<Option<ProviderError>>,
}

impl MockVendor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_append(&self, err: ProviderError) {
        *lock(&self.append_error) = Some(err);
    }

    pub fn fail_next_delete(&self, err: ProviderError) {
        *lock(&self.delete_error) = Some(err);
    }

    /// Successful appends, in call order.
    pub fn appended(&self) -> Vec<AppendCall> {
        lock(&self.appended).clone()
    }

    /// Successful deletes, in call order.
    pub fn deleted(&self) -> Vec<DeleteCall> {
        lock(&self.deleted).clone()
    }

    /// Append attempts, failed ones included.
    pub fn append_calls(&self) -> usize {
        self.append_attempts.load(Ordering::SeqCst)
    }

    /// Delete attempts, failed ones included.
    pub fn delete_calls(&self) -> usize {
        self.delete_attempts.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.append_calls() + self.delete_calls()
    }
}

#[async_trait]
impl DnsVendor for MockVendor {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn append_record(&self, zone: &str, record: &TxtRecord) -> ProviderResult<String> {
        self.append_attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = lock(&self.append_error).take() {
            return Err(err);
        }
        let record_id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        lock(&self.appended).push(AppendCall {
            zone: zone.to_string(),
            record: record.clone(),
            record_id: record_id.clone(),
        });
        Ok(record_id)
    }

    async fn delete_record(&self, zone: &str, record_id: &str) -> ProviderResult<()> {
        self.delete_attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = lock(&self.delete_error).take() {
            return Err(err);
        }
        lock(&self.deleted).push(DeleteCall {
            zone: zone.to_string(),
            record_id: record_id.to_string(),
        });
        Ok(())
    }
}

// ===== StaticSoaLookup =====

/// Answers SOA queries from a fixed set of zone apexes.
///
/// Clones share the query log.
#[derive(Clone, Default)]
pub struct StaticSoaLookup {
    zones: HashSet<String>,
    failing: HashSet<String>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StaticSoaLookup {
    pub fn new<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            zones: zones
                .into_iter()
                .map(|z| z.into().to_ascii_lowercase())
                .collect(),
            ..Self::default()
        }
    }

    /// Make queries for `name` fail as a transport error would.
    #[must_use]
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_ascii_lowercase());
        self
    }

    /// Every name queried so far, in order.
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl SoaLookup for StaticSoaLookup {
    async fn has_soa(&self, name: &str) -> CoreResult<bool> {
        lock(&self.queries).push(name.to_string());
        let name = name.to_ascii_lowercase();
        if self.failing.contains(&name) {
            return Err(CoreError::ZoneResolution {
                fqdn: name,
                detail: "simulated transport failure".to_string(),
            });
        }
        Ok(self.zones.contains(&name))
    }
}

// ===== RecordingSink =====

#[derive(Debug, Clone)]
pub struct SinkEvent {
    pub info: RequestInfo,
    /// `"ok"` or [`CoreError::kind`]
    pub outcome: String,
}

/// Keeps every request event for inspection.
#[derive(Default)]
pub struct RecordingSink {
    received: AtomicUsize,
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed requests, in completion order.
    pub fn events(&self) -> Vec<SinkEvent> {
        lock(&self.events).clone()
    }

    pub fn received_count(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }
}

impl RequestSink for RecordingSink {
    fn received(&self, _info: &RequestInfo) {
        self.received.fetch_add(1, Ordering::SeqCst);
    }

    fn completed(&self, info: &RequestInfo, outcome: Result<(), &CoreError>) {
        lock(&self.events).push(SinkEvent {
            info: info.clone(),
            outcome: outcome.map_or_else(|e| e.kind().to_string(), |()| "ok".to_string()),
        });
    }
}

// ===== Factories =====

/// Proxy over a [`MockVendor`] and a [`StaticSoaLookup`] serving `zones`.
///
/// # Panics
///
/// If `rules` does not build.
pub fn proxy_with<I, S>(
    rules: &[RuleConfig],
    zones: I,
) -> (AuthorizingProxy, Arc<MockVendor>, Arc<RecordingSink>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    #[allow(clippy::expect_used)]
    let acl = AccessControlList::build(rules).expect("test rules must build");
    let vendor = Arc::new(MockVendor::new());
    let sink = Arc::new(RecordingSink::new());
    let resolver = Arc::new(SoaZoneResolver::new(StaticSoaLookup::new(zones)));
    let gateway = ProviderGateway::new(vendor.clone(), resolver);
    let proxy = AuthorizingProxy::new(acl, gateway, sink.clone());
    (proxy, vendor, sink)
}
