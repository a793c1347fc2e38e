//! Cloudflare `DnsVendor` implementation

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, relative_to_full_name};
use crate::traits::{DnsVendor, ErrorContext, ProviderErrorMapper};
use crate::types::TxtRecord;

use super::{CloudflareDnsRecord, CloudflareVendor, CloudflareZone, CreateTxtRecord};

impl CloudflareVendor {
    /// Look up the Cloudflare zone ID for a zone name.
    pub(crate) async fn find_zone_id(&self, zone: &str) -> Result<String> {
        let name = normalize_domain_name(zone);
        let context = ErrorContext {
            domain: Some(name.to_string()),
            ..Default::default()
        };
        let zones: Vec<CloudflareZone> = self
            .get(
                &format!("/zones?name={}", urlencoding::encode(name)),
                context,
            )
            .await?;

        zones
            .into_iter()
            .find(|z| z.name.eq_ignore_ascii_case(name))
            .map(|z| z.id)
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: name.to_string(),
                raw_message: None,
            })
    }
}

#[async_trait]
impl DnsVendor for CloudflareVendor {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn append_record(&self, zone: &str, record: &TxtRecord) -> Result<String> {
        let zone_id = self.find_zone_id(zone).await?;
        let full_name = relative_to_full_name(&record.name, zone);
        let body = CreateTxtRecord {
            record_type: "TXT",
            name: &full_name,
            content: &record.value,
            ttl: record.ttl,
        };
        let context = ErrorContext {
            record_name: Some(full_name.clone()),
            domain: Some(normalize_domain_name(zone).to_string()),
            ..Default::default()
        };

        let created: CloudflareDnsRecord = self
            .post(&format!("/zones/{zone_id}/dns_records"), &body, context)
            .await?;
        log::debug!("[cloudflare] created TXT {} ({})", created.name, created.id);
        Ok(created.id)
    }

    async fn delete_record(&self, zone: &str, record_id: &str) -> Result<()> {
        let zone_id = self.find_zone_id(zone).await?;
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            domain: Some(normalize_domain_name(zone).to_string()),
            ..Default::default()
        };
        self.delete(&format!("/zones/{zone_id}/dns_records/{record_id}"), context)
            .await
    }
}
