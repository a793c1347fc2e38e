//! Challenge dispatch to the configured DNS vendor

use std::sync::Arc;

use acme_dns_proxy_provider::{DnsVendor, TxtRecord};

use crate::dns01::{relative_record_name, txt_record_name};
use crate::error::CoreResult;
use crate::pending::{PendingRecord, PendingRecordStore};
use crate::types::Challenge;
use crate::zone::ZoneResolver;

/// Publishes and removes challenge records through one vendor.
///
/// Remembers the vendor record id of every present so the matching cleanup
/// deletes exactly that record.
pub struct ProviderGateway {
    vendor: Arc<dyn DnsVendor>,
    resolver: Arc<dyn ZoneResolver>,
    pending: PendingRecordStore,
}

impl ProviderGateway {
    #[must_use]
    pub fn new(vendor: Arc<dyn DnsVendor>, resolver: Arc<dyn ZoneResolver>) -> Self {
        Self {
            vendor,
            resolver,
            pending: PendingRecordStore::new(),
        }
    }

    pub fn vendor_id(&self) -> &'static str {
        self.vendor.id()
    }

    /// Records created by present and not yet cleaned up.
    pub fn pending(&self) -> &PendingRecordStore {
        &self.pending
    }

    /// Create the `_acme-challenge` TXT record for `challenge`.
    pub async fn present(&self, challenge: &Challenge) -> CoreResult<()> {
        let zone = self.resolver.resolve_zone(&challenge.fqdn).await?;
        let name = relative_record_name(&txt_record_name(&challenge.fqdn), &zone);
        let record = TxtRecord::challenge(name, challenge.encoded_key_auth.as_str());

        let record_id = self.vendor.append_record(&zone, &record).await?;
        log::info!(
            "[{}] created TXT {} in {zone} (record {record_id})",
            self.vendor.id(),
            record.name
        );

        let replaced = self
            .pending
            .insert(
                &challenge.encoded_key_auth,
                PendingRecord { record_id, zone },
            )
            .await;
        if let Some(old) = replaced {
            log::warn!(
                "[{}] present repeated for {}; record {} in {} is no longer tracked",
                self.vendor.id(),
                challenge.fqdn,
                old.record_id,
                old.zone
            );
        }
        Ok(())
    }

    /// Delete the record created by the matching present.
    ///
    /// The pending entry is consumed before the vendor call and is not restored
    /// if the delete fails.
    pub async fn cleanup(&self, challenge: &Challenge) -> CoreResult<()> {
        let PendingRecord { record_id, zone } = self
            .pending
            .take_and_remove(&challenge.encoded_key_auth)
            .await?;

        self.vendor.delete_record(&zone, &record_id).await?;
        log::info!(
            "[{}] deleted record {record_id} in {zone} for {}",
            self.vendor.id(),
            challenge.fqdn
        );
        Ok(())
    }
}
